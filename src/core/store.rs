//! Collaborator seams used by the upload handler and the compliance checker.
//!
//! `db::store::SqliteStore` implements both traits; tests may swap in fakes.

use crate::errors::AppResult;
use crate::models::metric::MetricKind;
use crate::models::record::MetricRecord;
use crate::models::role::Role;
use crate::models::user::User;
use chrono::NaiveDate;

pub trait RecordStore {
    /// Any record of `kind` dated exactly `date`.
    fn find(&self, kind: MetricKind, date: NaiveDate) -> AppResult<Option<MetricRecord>>;

    /// The record of `kind` for `date` and `sub_key`.
    fn find_keyed(
        &self,
        kind: MetricKind,
        date: NaiveDate,
        sub_key: &str,
    ) -> AppResult<Option<MetricRecord>>;

    /// The most recent record of `kind` dated on or after `from`.
    fn find_since(&self, kind: MetricKind, from: NaiveDate) -> AppResult<Option<MetricRecord>>;

    /// The most recent record of `kind`, whatever its date.
    fn latest(&self, kind: MetricKind) -> AppResult<Option<MetricRecord>>;

    /// Records of `kind` inside inclusive bounds (all when `None`), oldest first.
    fn records_between(
        &self,
        kind: MetricKind,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<MetricRecord>>;

    /// Insert or update every record atomically, keyed by (kind, date, sub_key).
    fn upsert_all(&self, records: &[MetricRecord]) -> AppResult<()>;
}

pub trait UserDirectory {
    /// The user assigned to `role`, if any.
    fn find_by_role(&self, role: Role) -> AppResult<Option<User>>;

    fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Every user with an upload obligation.
    fn uploaders(&self) -> AppResult<Vec<User>>;
}
