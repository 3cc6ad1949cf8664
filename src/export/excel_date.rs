// src/export/excel_date.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Excel serial of a calendar day.
pub(crate) fn date_serial(d: NaiveDate) -> Option<f64> {
    naive_datetime_to_excel_serial(&d.and_hms_opt(0, 0, 0)?)
}

/// Excel serial of an RFC 3339 or ISO date-time stamp, in its own local time.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<f64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return naive_datetime_to_excel_serial(&dt.naive_local());
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(|dt| naive_datetime_to_excel_serial(&dt))
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> Option<f64> {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;

    let duration = *dt - excel_epoch;

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    Some(days + secs / 86400.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_and_stamps_become_serials() {
        assert_eq!(date_serial(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()), Some(2.0));

        let serial = parse_to_excel_date("2024-03-06T12:00:00+02:00").unwrap();
        assert!((serial.fract() - 0.5).abs() < 1e-9);
        assert!(parse_to_excel_date("2024-03-06 18:00:00").is_some());
    }

    #[test]
    fn other_text_is_not_a_stamp() {
        assert_eq!(parse_to_excel_date("150.50"), None);
        assert_eq!(parse_to_excel_date(""), None);
    }
}
