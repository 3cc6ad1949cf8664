use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Expected submission frequency of a checklist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
    /// Satisfied by any record in the last N days, today included.
    Range(u32),
}

/// What the record store is probed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "date", rename_all = "snake_case")]
pub enum Target {
    /// A record dated exactly on this day.
    Exact(NaiveDate),
    /// Any record dated on or after this day.
    Since(NaiveDate),
}

impl Target {
    pub fn is_exact(&self) -> bool {
        matches!(self, Target::Exact(_))
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::Daily => f.write_str("daily"),
            Cadence::Weekly => f.write_str("weekly"),
            Cadence::Monthly => f.write_str("monthly"),
            Cadence::Range(n) => write!(f, "last {n} days"),
        }
    }
}
