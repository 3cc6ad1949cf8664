// src/export/model.rs

use crate::models::metric::{FieldValue, MetricKind};
use crate::models::record::MetricRecord;

/// Header for CSV / XLSX: date, optional sub-key, then every schema column.
pub(crate) fn get_headers(kind: MetricKind) -> Vec<&'static str> {
    let mut headers = vec!["date"];
    if kind.is_keyed() {
        headers.push("bank");
    }
    headers.extend(kind.fields().iter().map(|f| f.column));
    headers.push("updated_at");
    headers
}

/// Full-precision text of a stored value; two-decimal rendering is for display only.
fn raw_value(value: FieldValue) -> String {
    match value {
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Float(v) => v.to_string(),
    }
}

pub(crate) fn record_to_row(rec: &MetricRecord) -> Vec<String> {
    let mut row = vec![rec.date.format("%Y-%m-%d").to_string()];
    if rec.kind.is_keyed() {
        row.push(rec.sub_key.clone());
    }
    for field in rec.kind.fields() {
        let value = rec
            .values
            .get(field.column)
            .copied()
            .unwrap_or_else(|| field.default_value());
        row.push(raw_value(value));
    }
    row.push(rec.updated_at.clone());
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn keyed_rows_carry_the_bank_column() {
        let mut rec = MetricRecord::new(
            MetricKind::DailyBalance,
            NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            "Ecobank",
        );
        rec.values.insert("usd_balance".into(), FieldValue::Float(12.0));

        let headers = get_headers(MetricKind::DailyBalance);
        let row = record_to_row(&rec);
        assert_eq!(headers.len(), row.len());
        assert_eq!(row[1], "Ecobank");
        assert_eq!(row[2], "12");
        assert_eq!(row[3], "0");
    }

    #[test]
    fn rows_keep_every_stored_decimal() {
        let mut rec = MetricRecord::new(
            MetricKind::ScrapData,
            NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            "",
        );
        rec.values.insert("supplied_tns".into(), FieldValue::Float(12.345));
        rec.values.insert("total_purchased_tns".into(), FieldValue::Float(0.1 + 0.2));

        let row = record_to_row(&rec);
        assert_eq!(row[1], "12.345");
        assert_eq!(row[2].parse::<f64>().unwrap(), 0.1 + 0.2);
    }

    #[test]
    fn integer_fields_are_written_without_decimals() {
        let mut rec = MetricRecord::new(
            MetricKind::OperationalData,
            NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            "",
        );
        rec.values.insert("u1_hours".into(), FieldValue::Int(3));

        let row = record_to_row(&rec);
        assert_eq!(&row[1..5], &["3", "0", "0", "0"]);
    }
}
