//! Daily trigger times for the reminder and overdue jobs.

use chrono::{Duration, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Reminder,
    OverdueCheck,
}

impl Job {
    pub fn name(&self) -> &'static str {
        match self {
            Job::Reminder => "reminder_job",
            Job::OverdueCheck => "overdue_job",
        }
    }
}

/// Next occurrence of `at` strictly after `now`.
pub fn next_fire(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(at);
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// The job that fires first after `now`; the reminder wins ties.
pub fn next_job(now: NaiveDateTime, reminder: NaiveTime, overdue: NaiveTime) -> (NaiveDateTime, Job) {
    let r = next_fire(now, reminder);
    let o = next_fire(now, overdue);
    if o < r {
        (o, Job::OverdueCheck)
    } else {
        (r, Job::Reminder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn now(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 6).unwrap().and_time(at(h, m))
    }

    #[test]
    fn fires_today_when_slot_is_ahead() {
        assert_eq!(next_fire(now(7, 30), at(8, 0)), now(8, 0));
    }

    #[test]
    fn fires_tomorrow_when_slot_has_passed() {
        let next = next_fire(now(8, 0), at(8, 0));
        assert_eq!(next, now(8, 0) + Duration::days(1));
    }

    #[test]
    fn picks_the_earliest_job() {
        assert_eq!(next_job(now(9, 0), at(8, 0), at(10, 0)).1, Job::OverdueCheck);
        assert_eq!(next_job(now(11, 0), at(8, 0), at(10, 0)).1, Job::Reminder);
    }
}
