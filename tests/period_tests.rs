use chrono::{Datelike, Duration, NaiveDate, Weekday};
use kpidesk::core::period::{range_floor, resolve_effective_date, target_for};
use kpidesk::models::cadence::{Cadence, Target};
use kpidesk::models::role::Role;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Every day of 2023 and 2024, leap day included.
fn two_years() -> impl Iterator<Item = NaiveDate> {
    d(2023, 1, 1).iter_days().take_while(|x| *x <= d(2024, 12, 31))
}

#[test]
fn weekly_roles_resolve_to_a_monday_at_most_six_days_back() {
    for today in two_years() {
        for role in [Role::Payables, Role::Receivables] {
            let eff = resolve_effective_date(role, today);
            assert_eq!(eff.weekday(), Weekday::Mon, "{role} on {today}");
            assert!(eff <= today);
            assert!(today - eff <= Duration::days(6));
        }
    }
}

#[test]
fn interest_resolves_to_the_first_of_the_month() {
    for today in two_years() {
        let eff = resolve_effective_date(Role::Interest, today);
        assert_eq!(eff.day(), 1);
        assert_eq!((eff.year(), eff.month()), (today.year(), today.month()));
    }
}

#[test]
fn daily_roles_resolve_to_today() {
    for role in [Role::Balance, Role::Sponge, Role::Sales, Role::Scrap, Role::Plant] {
        for today in two_years().step_by(17) {
            assert_eq!(resolve_effective_date(role, today), today);
        }
    }
}

#[test]
fn reference_dates() {
    // Wednesday
    assert_eq!(resolve_effective_date(Role::Payables, d(2024, 3, 6)), d(2024, 3, 4));
    // Friday, first of the month: both anchors disagree
    assert_eq!(resolve_effective_date(Role::Interest, d(2024, 3, 1)), d(2024, 3, 1));
    assert_eq!(resolve_effective_date(Role::Receivables, d(2024, 3, 1)), d(2024, 2, 26));
    // week spanning a year boundary
    assert_eq!(resolve_effective_date(Role::Payables, d(2025, 1, 1)), d(2024, 12, 30));
}

#[test]
fn range_targets_use_an_inclusive_floor() {
    let today = d(2024, 3, 6);
    assert_eq!(range_floor(today, 3), d(2024, 3, 4));
    assert_eq!(range_floor(today, 1), today);
    assert_eq!(range_floor(today, 0), today);
    assert_eq!(target_for(Cadence::Range(3), today), Target::Since(d(2024, 3, 4)));
    assert_eq!(target_for(Cadence::Weekly, today), Target::Exact(d(2024, 3, 4)));
    assert_eq!(target_for(Cadence::Monthly, today), Target::Exact(d(2024, 3, 1)));
}
