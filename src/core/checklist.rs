//! The fixed list of submissions the overdue check expects.

use crate::config::Config;
use crate::core::period::role_cadence;
use crate::models::cadence::Cadence;
use crate::models::metric::MetricKind;
use crate::models::role::Role;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistEntry {
    pub role: Role,
    pub kind: MetricKind,
    pub name: &'static str,
    pub cadence: Cadence,
}

impl ChecklistEntry {
    fn for_metric(kind: MetricKind) -> Self {
        let role = kind.owner();
        Self {
            role,
            kind,
            name: kind.display_name(),
            cadence: role_cadence(role),
        }
    }
}

/// Check order: daily metrics first, then weekly, then monthly.
const CHECK_ORDER: [MetricKind; 10] = [
    MetricKind::DailyBalance,
    MetricKind::SalesData,
    MetricKind::ScrapData,
    MetricKind::ProductionSponge,
    MetricKind::ProductionMain,
    MetricKind::OperationalData,
    MetricKind::GasPlantData,
    MetricKind::AccountPayables,
    MetricKind::AccountReceivables,
    MetricKind::BankInterest,
];

/// Every metric with the cadence of its owner role; no grace windows.
pub fn strict_checklist() -> Vec<ChecklistEntry> {
    CHECK_ORDER.into_iter().map(ChecklistEntry::for_metric).collect()
}

/// Checklist with the configured grace windows applied to daily metrics.
pub fn checklist_from_config(cfg: &Config) -> Vec<ChecklistEntry> {
    strict_checklist()
        .into_iter()
        .map(|mut entry| {
            if entry.cadence == Cadence::Daily {
                if let Some(cadence) = cfg.grace_cadence(entry.kind) {
                    entry.cadence = cadence;
                }
            }
            entry
        })
        .collect()
}
