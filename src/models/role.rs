use crate::models::metric::MetricKind;
use serde::Serialize;

/// Submission obligation attached to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Balance,
    Interest,
    Payables,
    Receivables,
    Sponge,
    Sales,
    Scrap,
    Plant,
    Viewer,
}

impl Role {
    /// Every role that carries an upload obligation.
    pub const UPLOADERS: [Role; 8] = [
        Role::Balance,
        Role::Interest,
        Role::Payables,
        Role::Receivables,
        Role::Sponge,
        Role::Sales,
        Role::Scrap,
        Role::Plant,
    ];

    /// Short name used on the command line (`balance`, `viewer`, ...).
    pub fn code(&self) -> &'static str {
        match self {
            Role::Balance => "balance",
            Role::Interest => "interest",
            Role::Payables => "payables",
            Role::Receivables => "receivables",
            Role::Sponge => "sponge",
            Role::Sales => "sales",
            Role::Scrap => "scrap",
            Role::Plant => "plant",
            Role::Viewer => "viewer",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Balance => "uploader_balance",
            Role::Interest => "uploader_interest",
            Role::Payables => "uploader_payables",
            Role::Receivables => "uploader_receivables",
            Role::Sponge => "uploader_sponge",
            Role::Sales => "uploader_sales",
            Role::Scrap => "uploader_scrap",
            Role::Plant => "uploader_plant",
            Role::Viewer => "viewer",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::UPLOADERS
            .into_iter()
            .chain(std::iter::once(Role::Viewer))
            .find(|r| r.to_db_str() == s)
    }

    /// Helper: accept both `sales` and `uploader_sales`, any case.
    pub fn from_code(code: &str) -> Option<Self> {
        let lower = code.trim().to_lowercase();
        let short = lower.strip_prefix("uploader_").unwrap_or(&lower);
        Self::UPLOADERS
            .into_iter()
            .chain(std::iter::once(Role::Viewer))
            .find(|r| r.code() == short)
    }

    pub fn is_uploader(&self) -> bool {
        !matches!(self, Role::Viewer)
    }

    /// Metric families this role is responsible for.
    pub fn metrics(&self) -> &'static [MetricKind] {
        match self {
            Role::Balance => &[MetricKind::DailyBalance],
            Role::Interest => &[MetricKind::BankInterest],
            Role::Payables => &[MetricKind::AccountPayables],
            Role::Receivables => &[MetricKind::AccountReceivables],
            Role::Sponge => &[MetricKind::ProductionSponge],
            Role::Sales => &[MetricKind::SalesData],
            Role::Scrap => &[MetricKind::ScrapData],
            Role::Plant => &[
                MetricKind::ProductionMain,
                MetricKind::OperationalData,
                MetricKind::GasPlantData,
            ],
            Role::Viewer => &[],
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_strings_round_trip_for_every_role() {
        for role in Role::UPLOADERS.into_iter().chain([Role::Viewer]) {
            assert_eq!(Role::from_db_str(role.to_db_str()), Some(role));
        }
        assert_eq!(Role::from_db_str("uploader_unknown"), None);
    }

    #[test]
    fn from_code_accepts_prefixed_and_short_names() {
        assert_eq!(Role::from_code("Scrap"), Some(Role::Scrap));
        assert_eq!(Role::from_code("uploader_plant"), Some(Role::Plant));
        assert_eq!(Role::from_code("boss"), None);
    }

    #[test]
    fn every_uploader_owns_at_least_one_metric() {
        for role in Role::UPLOADERS {
            assert!(!role.metrics().is_empty(), "{role} owns no metric");
        }
        assert!(Role::Viewer.metrics().is_empty());
    }
}
