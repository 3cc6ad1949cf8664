use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// `--date` value when given, today otherwise.
pub fn date_or_today(arg: Option<&str>) -> AppResult<NaiveDate> {
    match arg {
        Some(s) => parse_date(s),
        None => Ok(today()),
    }
}

/// `06-Mar-2024`, the format used in upload confirmations.
pub fn short_label(d: NaiveDate) -> String {
    d.format("%d-%b-%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_label() {
        let d = parse_date("2024-03-06").unwrap();
        assert_eq!(short_label(d), "06-Mar-2024");
        assert!(parse_date("06/03/2024").is_err());
        assert_eq!(date_or_today(None).unwrap(), today());
    }
}
