//! Latest-figures aggregation shown to viewers.

use crate::core::store::RecordStore;
use crate::errors::AppResult;
use crate::models::metric::{FieldValue, MetricKind, SALES_PRODUCT_COLUMNS};
use crate::models::record::MetricRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BankBalance {
    pub name: String,
    pub usd: f64,
    pub zig: f64,
}

/// Most recent record of one metric.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Snapshot {
    pub kind: MetricKind,
    pub name: &'static str,
    pub date: Option<NaiveDate>,
    pub values: BTreeMap<String, FieldValue>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Headline {
    pub interest_total: f64,
    pub payables_total: f64,
    pub receivables_total: f64,
    pub billets_total: f64,
    pub sales_products_total: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub date: NaiveDate,
    pub balances: Vec<BankBalance>,
    pub headline: Headline,
    pub latest: Vec<Snapshot>,
}

fn total(rec: &Option<MetricRecord>, columns: &[&str]) -> f64 {
    rec.as_ref().map(|r| r.sum(columns)).unwrap_or(0.0)
}

/// Balances for `date` (zero for banks that did not report) plus the latest
/// record of every other metric.
pub fn build_dashboard<S: RecordStore>(
    store: &S,
    date: NaiveDate,
    banks: &[String],
) -> AppResult<Dashboard> {
    let mut balances = Vec::with_capacity(banks.len());
    for bank in banks {
        let rec = store.find_keyed(MetricKind::DailyBalance, date, bank)?;
        balances.push(BankBalance {
            name: bank.clone(),
            usd: rec.as_ref().map(|r| r.value("usd_balance")).unwrap_or(0.0),
            zig: rec.as_ref().map(|r| r.value("zig_balance")).unwrap_or(0.0),
        });
    }

    let mut latest_by_kind: BTreeMap<MetricKind, Option<MetricRecord>> = BTreeMap::new();
    for kind in MetricKind::ALL.into_iter().filter(|k| !k.is_keyed()) {
        latest_by_kind.insert(kind, store.latest(kind)?);
    }

    let get = |kind: MetricKind| latest_by_kind.get(&kind).cloned().flatten();

    let headline = Headline {
        interest_total: total(&get(MetricKind::BankInterest), &["paid", "due"]),
        payables_total: total(
            &get(MetricKind::AccountPayables),
            &["creditors", "creditors_project"],
        ),
        receivables_total: total(&get(MetricKind::AccountReceivables), &["total_amount"]),
        billets_total: total(
            &get(MetricKind::ProductionMain),
            &["unit_1_cumulative", "unit_2_cumulative"],
        ),
        sales_products_total: total(&get(MetricKind::SalesData), SALES_PRODUCT_COLUMNS),
    };

    let latest = latest_by_kind
        .iter()
        .map(|(kind, rec)| Snapshot {
            kind: *kind,
            name: kind.display_name(),
            date: rec.as_ref().map(|r| r.date),
            values: rec.as_ref().map(|r| r.values.clone()).unwrap_or_default(),
        })
        .collect();

    Ok(Dashboard {
        date,
        balances,
        headline,
        latest,
    })
}
