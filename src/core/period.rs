//! Effective-date resolution: which reporting period a submission belongs to.

use crate::models::cadence::{Cadence, Target};
use crate::models::role::Role;
use chrono::{Datelike, Duration, NaiveDate};

/// Monday of the week containing `today`.
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
}

/// First day of the month containing `today`.
pub fn month_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

/// Oldest date still inside a rolling window of `days` days ending today.
/// A zero-day window is treated as a one-day window.
pub fn range_floor(today: NaiveDate, days: u32) -> NaiveDate {
    today - Duration::days(i64::from(days.max(1) - 1))
}

/// Reporting period of a role's submissions.
pub fn role_cadence(role: Role) -> Cadence {
    match role {
        Role::Interest => Cadence::Monthly,
        Role::Payables | Role::Receivables => Cadence::Weekly,
        Role::Balance
        | Role::Sponge
        | Role::Sales
        | Role::Scrap
        | Role::Plant
        | Role::Viewer => Cadence::Daily,
    }
}

/// Date under which a submission made on `today` must be filed.
pub fn resolve_effective_date(role: Role, today: NaiveDate) -> NaiveDate {
    match role_cadence(role) {
        Cadence::Monthly => month_start(today),
        Cadence::Weekly => week_start(today),
        Cadence::Daily | Cadence::Range(_) => today,
    }
}

/// Probe target for a cadence as seen on `today`.
pub fn target_for(cadence: Cadence, today: NaiveDate) -> Target {
    match cadence {
        Cadence::Daily => Target::Exact(today),
        Cadence::Weekly => Target::Exact(week_start(today)),
        Cadence::Monthly => Target::Exact(month_start(today)),
        Cadence::Range(days) => Target::Since(range_floor(today, days)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_start_on_monday_is_identity() {
        assert_eq!(week_start(d(2024, 3, 4)), d(2024, 3, 4));
        assert_eq!(week_start(d(2024, 3, 10)), d(2024, 3, 4));
    }

    #[test]
    fn week_start_crosses_month_boundary() {
        // Friday 2024-03-01 belongs to the week of Monday 2024-02-26
        assert_eq!(week_start(d(2024, 3, 1)), d(2024, 2, 26));
    }

    #[test]
    fn range_floor_includes_today() {
        assert_eq!(range_floor(d(2024, 3, 6), 3), d(2024, 3, 4));
        assert_eq!(range_floor(d(2024, 3, 6), 1), d(2024, 3, 6));
        assert_eq!(range_floor(d(2024, 3, 6), 0), d(2024, 3, 6));
    }

    #[test]
    fn targets_follow_cadence() {
        let wed = d(2024, 3, 6);
        assert_eq!(target_for(Cadence::Daily, wed), Target::Exact(wed));
        assert_eq!(target_for(Cadence::Weekly, wed), Target::Exact(d(2024, 3, 4)));
        assert_eq!(target_for(Cadence::Monthly, wed), Target::Exact(d(2024, 3, 1)));
        assert_eq!(target_for(Cadence::Range(3), wed), Target::Since(d(2024, 3, 4)));
    }
}
