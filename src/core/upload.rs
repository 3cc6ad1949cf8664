use crate::core::period::resolve_effective_date;
use crate::core::store::{RecordStore, UserDirectory};
use crate::errors::{AppError, AppResult};
use crate::models::metric::MetricKind;
use crate::models::record::MetricRecord;
use crate::models::role::Role;
use crate::models::user::User;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Result of a successful submission.
#[derive(Debug)]
pub struct UploadOutcome {
    pub user: User,
    pub effective_date: NaiveDate,
    pub records: Vec<MetricRecord>,
    /// Submitted keys that no field of the role's forms uses.
    pub ignored: Vec<String>,
}

/// High-level business logic for the `upload` command.
pub struct UploadLogic;

impl UploadLogic {
    /// Parse `KEY=VALUE` assignments; values stay raw and are coerced later.
    pub fn parse_assignments(args: &[String]) -> AppResult<HashMap<String, String>> {
        let mut out = HashMap::new();
        for arg in args {
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| AppError::InvalidField(arg.clone()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(AppError::InvalidField(arg.clone()));
            }
            out.insert(key.to_string(), value.to_string());
        }
        Ok(out)
    }

    /// Every (metric, sub-key) pair a role fills in one submission.
    pub fn form_slots(role: Role, banks: &[String]) -> Vec<(MetricKind, String)> {
        role.metrics()
            .iter()
            .flat_map(|kind| {
                if kind.is_keyed() {
                    banks.iter().map(|b| (*kind, b.clone())).collect::<Vec<_>>()
                } else {
                    vec![(*kind, String::new())]
                }
            })
            .collect()
    }

    /// Build the records of a submission from raw form values.
    pub fn build_records(
        role: Role,
        effective_date: NaiveDate,
        banks: &[String],
        raw: &HashMap<String, String>,
    ) -> Vec<MetricRecord> {
        Self::form_slots(role, banks)
            .into_iter()
            .map(|(kind, sub_key)| {
                let mut rec = MetricRecord::new(kind, effective_date, sub_key);
                for field in kind.fields() {
                    let key = field.form_key_for(&rec.sub_key);
                    let value = field.coerce(raw.get(&key).map(String::as_str));
                    rec.values.insert(field.column.to_string(), value);
                }
                rec
            })
            .collect()
    }

    /// Resolve the effective date for `username` and upsert every record of its role.
    pub fn submit<S, D>(
        store: &S,
        directory: &D,
        username: &str,
        today: NaiveDate,
        banks: &[String],
        raw: &HashMap<String, String>,
    ) -> AppResult<UploadOutcome>
    where
        S: RecordStore,
        D: UserDirectory,
    {
        let user = directory
            .find_by_username(username)?
            .ok_or_else(|| AppError::UnknownUser(username.to_string()))?;

        if !user.role.is_uploader() {
            return Err(AppError::NotAnUploader(user.username));
        }

        let effective_date = resolve_effective_date(user.role, today);
        let records = Self::build_records(user.role, effective_date, banks, raw);

        let known: BTreeSet<String> = Self::form_slots(user.role, banks)
            .iter()
            .flat_map(|(kind, sub)| kind.fields().iter().map(|f| f.form_key_for(sub)))
            .collect();
        let mut ignored: Vec<String> = raw
            .keys()
            .filter(|k| !known.contains(k.as_str()))
            .cloned()
            .collect();
        ignored.sort();

        store.upsert_all(&records)?;

        Ok(UploadOutcome {
            user,
            effective_date,
            records,
            ignored,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::metric::FieldValue;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn assignments_require_an_equals_sign() {
        let ok = UploadLogic::parse_assignments(&["CBZ Bank_usd=10".into()]).unwrap();
        assert_eq!(ok.get("CBZ Bank_usd").map(String::as_str), Some("10"));
        assert!(UploadLogic::parse_assignments(&["supplied".into()]).is_err());
        assert!(UploadLogic::parse_assignments(&["=4".into()]).is_err());
    }

    #[test]
    fn balance_submission_builds_one_record_per_bank() {
        let banks = vec!["CBZ Bank".to_string(), "Nedbank".to_string()];
        let raw = HashMap::from([
            ("CBZ Bank_usd".to_string(), "150.5".to_string()),
            ("Nedbank_zig".to_string(), "oops".to_string()),
        ]);

        let recs = UploadLogic::build_records(Role::Balance, d(2024, 3, 6), &banks, &raw);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].sub_key, "CBZ Bank");
        assert_eq!(recs[0].values["usd_balance"], FieldValue::Float(150.5));
        assert_eq!(recs[1].values["zig_balance"], FieldValue::Float(0.0));
    }

    #[test]
    fn plant_submission_fills_three_metrics() {
        let raw = HashMap::from([("u1_h".to_string(), "2".to_string())]);
        let recs = UploadLogic::build_records(Role::Plant, d(2024, 3, 6), &[], &raw);
        let kinds: Vec<_> = recs.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MetricKind::ProductionMain,
                MetricKind::OperationalData,
                MetricKind::GasPlantData
            ]
        );
        assert_eq!(recs[1].values["u1_hours"], FieldValue::Int(2));
        assert_eq!(recs[1].values["u2_minutes"], FieldValue::Int(0));
    }
}
