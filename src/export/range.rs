// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

fn invalid(msg: impl Into<String>) -> AppError {
    AppError::InvalidRange(msg.into())
}

/// First and last day covered by a single `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid(format!("invalid year '{p}'")))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid("invalid year"))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid("invalid year"))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid(format!("invalid month '{p}'")))?;
            Ok((d1, month_last_day(d1)))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d")
                .map_err(|_| invalid(format!("invalid date '{p}'")))?;
            Ok((d, d))
        }
        _ => Err(invalid(format!("unsupported range format '{p}'"))),
    }
}

/// Parse --range (year / month / day / interval).
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let Some((start_raw, end_raw)) = r.split_once(':') else {
        return period_bounds(r.trim());
    };

    let start = start_raw.trim();
    let end = end_raw.trim();

    if start.len() != end.len() {
        return Err(invalid("start and end must have same format"));
    }

    let (d1, _) = period_bounds(start)?;
    let (_, d2) = period_bounds(end)?;

    if d1 > d2 {
        return Err(invalid(format!("start {d1} is after end {d2}")));
    }
    Ok((d1, d2))
}

fn month_last_day(first: NaiveDate) -> NaiveDate {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_periods() {
        assert_eq!(parse_range("2024").unwrap(), (d(2024, 1, 1), d(2024, 12, 31)));
        assert_eq!(parse_range("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(parse_range("2024-03-06").unwrap(), (d(2024, 3, 6), d(2024, 3, 6)));
    }

    #[test]
    fn intervals() {
        assert_eq!(
            parse_range("2023-11:2024-01").unwrap(),
            (d(2023, 11, 1), d(2024, 1, 31))
        );
        assert_eq!(parse_range("2022:2023").unwrap(), (d(2022, 1, 1), d(2023, 12, 31)));
    }

    #[test]
    fn rejects_mixed_or_reversed_ranges() {
        assert!(parse_range("2024:2024-03").is_err());
        assert!(parse_range("2024-03-10:2024-03-01").is_err());
        assert!(parse_range("March").is_err());
    }
}
