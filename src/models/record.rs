use crate::models::metric::{FieldValue, MetricKind};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// One submitted figure set, unique per (kind, date, sub_key).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub kind: MetricKind,
    pub date: NaiveDate,
    /// Bank name for balances, empty otherwise.
    pub sub_key: String,
    pub values: BTreeMap<String, FieldValue>,
    pub updated_at: String,
}

impl MetricRecord {
    pub fn new(kind: MetricKind, date: NaiveDate, sub_key: impl Into<String>) -> Self {
        Self {
            kind,
            date,
            sub_key: sub_key.into(),
            values: BTreeMap::new(),
            updated_at: String::new(),
        }
    }

    /// Numeric value of a column; absent columns read as zero.
    pub fn value(&self, column: &str) -> f64 {
        self.values.get(column).map(FieldValue::as_f64).unwrap_or(0.0)
    }

    pub fn sum(&self, columns: &[&str]) -> f64 {
        columns.iter().map(|c| self.value(c)).sum()
    }
}
