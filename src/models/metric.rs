//! Metric families and their declarative field schema.
//!
//! The schema drives both the upload handler (`core::upload`) and the
//! `fields` command, so a metric's form keys are declared exactly once.

use crate::models::role::Role;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Float,
    Int,
}

/// Stored value of one numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
}

impl FieldValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            FieldValue::Int(v) => *v as f64,
            FieldValue::Float(v) => *v,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v:.2}"),
        }
    }
}

/// One numeric input of a metric form.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Key inside the stored payload.
    pub column: &'static str,
    /// Form key; for keyed metrics it is prefixed with `<sub_key>_`.
    pub form_key: &'static str,
    pub label: &'static str,
    pub ty: FieldType,
}

impl FieldSpec {
    const fn float(column: &'static str, form_key: &'static str, label: &'static str) -> Self {
        Self {
            column,
            form_key,
            label,
            ty: FieldType::Float,
        }
    }

    const fn int(column: &'static str, form_key: &'static str, label: &'static str) -> Self {
        Self {
            column,
            form_key,
            label,
            ty: FieldType::Int,
        }
    }

    pub fn default_value(&self) -> FieldValue {
        match self.ty {
            FieldType::Float => FieldValue::Float(0.0),
            FieldType::Int => FieldValue::Int(0),
        }
    }

    /// Coerce a raw form value; missing or malformed input yields the default.
    pub fn coerce(&self, raw: Option<&str>) -> FieldValue {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return self.default_value();
        };

        match self.ty {
            FieldType::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(FieldValue::Float)
                .unwrap_or_else(|| self.default_value()),
            FieldType::Int => raw
                .parse::<i64>()
                .map(FieldValue::Int)
                .unwrap_or_else(|_| self.default_value()),
        }
    }

    /// Full form key for a given sub-key (bank name) or none.
    pub fn form_key_for(&self, sub_key: &str) -> String {
        if sub_key.is_empty() {
            self.form_key.to_string()
        } else {
            format!("{}_{}", sub_key, self.form_key)
        }
    }
}

const BALANCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::float("usd_balance", "usd", "USD balance"),
    FieldSpec::float("zig_balance", "zig", "ZiG balance"),
];

const INTEREST_FIELDS: &[FieldSpec] = &[
    FieldSpec::float("paid", "int_paid", "Interest paid"),
    FieldSpec::float("due", "int_due", "Interest due"),
];

const PAYABLES_FIELDS: &[FieldSpec] = &[
    FieldSpec::float("creditors", "pay_cred", "Creditors"),
    FieldSpec::float("creditors_project", "pay_proj", "Project creditors"),
];

const RECEIVABLES_FIELDS: &[FieldSpec] =
    &[FieldSpec::float("total_amount", "rec_total", "Total receivables")];

const MAIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::float("unit_1_cumulative", "unit1", "Billets unit 1 (cumulative)"),
    FieldSpec::float("unit_2_cumulative", "unit2", "Billets unit 2 (cumulative)"),
    FieldSpec::float("rolling_non_tmt", "non_tmt", "Rolling non-TMT"),
    FieldSpec::float("rolling_tmt", "tmt", "Rolling TMT"),
];

const SPONGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::float("produced_tns", "sponge_prod", "Produced (t)"),
    FieldSpec::float("lost_tns", "sponge_lost", "Lost (t)"),
];

const SALES_FIELDS: &[FieldSpec] = &[
    FieldSpec::float("angles_sales", "angles", "Angles"),
    FieldSpec::float("flats_sales", "flats", "Flats"),
    FieldSpec::float("window_sections_sales", "window", "Window sections"),
    FieldSpec::float("fencing_standard_sales", "fencing", "Fencing standards"),
    FieldSpec::float("channel_iron_sales", "channel", "Channel iron"),
    FieldSpec::float("other_sections_sales", "other", "Other sections"),
    FieldSpec::float("redcliff_sales", "redcliff", "Redcliff branch"),
    FieldSpec::float("harare_sales", "harare", "Harare branch"),
    FieldSpec::float("mutare_sales", "mutare", "Mutare branch"),
    FieldSpec::float("bulawayo_sales", "bulawayo", "Bulawayo branch"),
    FieldSpec::float("chiredzi_sales", "chiredzi", "Chiredzi branch"),
];

/// Product lines only; branch columns break the same tonnage down by site.
pub const SALES_PRODUCT_COLUMNS: &[&str] = &[
    "angles_sales",
    "flats_sales",
    "window_sections_sales",
    "fencing_standard_sales",
    "channel_iron_sales",
    "other_sections_sales",
];

const GAS_FIELDS: &[FieldSpec] = &[FieldSpec::float(
    "industrial_gases_cyl",
    "ind_gas",
    "Industrial gases (cylinders)",
)];

const SCRAP_FIELDS: &[FieldSpec] = &[
    FieldSpec::float("supplied_tns", "supplied", "Supplied (t)"),
    FieldSpec::float("total_purchased_tns", "total", "Total purchased (t)"),
];

const OPERATIONAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::int("u1_hours", "u1_h", "Unit 1 outage hours"),
    FieldSpec::int("u1_minutes", "u1_m", "Unit 1 outage minutes"),
    FieldSpec::int("u2_hours", "u2_h", "Unit 2 outage hours"),
    FieldSpec::int("u2_minutes", "u2_m", "Unit 2 outage minutes"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    DailyBalance,
    BankInterest,
    AccountPayables,
    AccountReceivables,
    ProductionMain,
    ProductionSponge,
    SalesData,
    GasPlantData,
    ScrapData,
    OperationalData,
}

impl MetricKind {
    pub const ALL: [MetricKind; 10] = [
        MetricKind::DailyBalance,
        MetricKind::BankInterest,
        MetricKind::AccountPayables,
        MetricKind::AccountReceivables,
        MetricKind::ProductionMain,
        MetricKind::ProductionSponge,
        MetricKind::SalesData,
        MetricKind::GasPlantData,
        MetricKind::ScrapData,
        MetricKind::OperationalData,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MetricKind::DailyBalance => "daily_balance",
            MetricKind::BankInterest => "bank_interest",
            MetricKind::AccountPayables => "account_payables",
            MetricKind::AccountReceivables => "account_receivables",
            MetricKind::ProductionMain => "production_main",
            MetricKind::ProductionSponge => "production_sponge",
            MetricKind::SalesData => "sales_data",
            MetricKind::GasPlantData => "gas_plant_data",
            MetricKind::ScrapData => "scrap_data",
            MetricKind::OperationalData => "operational_data",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.to_db_str() == s)
    }

    /// Name used in notifications and on the dashboard.
    pub fn display_name(&self) -> &'static str {
        match self {
            MetricKind::DailyBalance => "Daily Bank Balances",
            MetricKind::BankInterest => "Bank Interest",
            MetricKind::AccountPayables => "Account Payables",
            MetricKind::AccountReceivables => "Account Receivables",
            MetricKind::ProductionMain => "Billets/Rolling Production",
            MetricKind::ProductionSponge => "Sponge Iron Production",
            MetricKind::SalesData => "Sales KPIs",
            MetricKind::GasPlantData => "Gas Plant Data",
            MetricKind::ScrapData => "Scrap Purchase KPIs",
            MetricKind::OperationalData => "Power Outages",
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            MetricKind::DailyBalance => BALANCE_FIELDS,
            MetricKind::BankInterest => INTEREST_FIELDS,
            MetricKind::AccountPayables => PAYABLES_FIELDS,
            MetricKind::AccountReceivables => RECEIVABLES_FIELDS,
            MetricKind::ProductionMain => MAIN_FIELDS,
            MetricKind::ProductionSponge => SPONGE_FIELDS,
            MetricKind::SalesData => SALES_FIELDS,
            MetricKind::GasPlantData => GAS_FIELDS,
            MetricKind::ScrapData => SCRAP_FIELDS,
            MetricKind::OperationalData => OPERATIONAL_FIELDS,
        }
    }

    /// Bank balances are stored once per bank; everything else once per date.
    pub fn is_keyed(&self) -> bool {
        matches!(self, MetricKind::DailyBalance)
    }

    pub fn owner(&self) -> Role {
        match self {
            MetricKind::DailyBalance => Role::Balance,
            MetricKind::BankInterest => Role::Interest,
            MetricKind::AccountPayables => Role::Payables,
            MetricKind::AccountReceivables => Role::Receivables,
            MetricKind::ProductionSponge => Role::Sponge,
            MetricKind::SalesData => Role::Sales,
            MetricKind::ScrapData => Role::Scrap,
            MetricKind::ProductionMain
            | MetricKind::GasPlantData
            | MetricKind::OperationalData => Role::Plant,
        }
    }

    /// Helper: accept `scrap`, `scrap_data`, `ScrapData` and similar spellings.
    pub fn from_code(code: &str) -> Option<Self> {
        let norm: String = code
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        Self::ALL.into_iter().find(|k| {
            let db = k.to_db_str().replace('_', "");
            db == norm || db.strip_suffix("data") == Some(norm.as_str())
        })
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
