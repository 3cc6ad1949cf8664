//! SQLite-backed record store and user directory.

use crate::core::store::{RecordStore, UserDirectory};
use crate::errors::{AppError, AppResult};
use crate::models::metric::{FieldValue, MetricKind};
use crate::models::record::MetricRecord;
use crate::models::role::Role;
use crate::models::user::User;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::BTreeMap;

const RECORD_COLUMNS: &str = "kind, date, sub_key, payload, updated_at";

pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &Connection {
        self.conn
    }

    fn query_one(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> AppResult<Option<MetricRecord>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        Ok(stmt.query_row(params, map_record).optional()?)
    }

    fn query_users(&self, sql: &str, params: impl rusqlite::Params) -> AppResult<Vec<User>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = stmt.query_map(params, map_user)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Register a new user; usernames and emails must be unique.
    pub fn insert_user(&self, username: &str, email: Option<&str>, role: Role) -> AppResult<User> {
        if self.find_by_username(username)?.is_some() {
            return Err(AppError::DuplicateUser(username.to_string()));
        }

        if let Some(email) = email {
            let owner: Option<String> = self
                .conn
                .query_row(
                    "SELECT username FROM users WHERE email = ?1",
                    [email],
                    |row| row.get(0),
                )
                .optional()?;
            if let Some(user) = owner {
                return Err(AppError::DuplicateEmail {
                    email: email.to_string(),
                    user,
                });
            }
        }

        self.conn.execute(
            "INSERT INTO users (username, email, role) VALUES (?1, ?2, ?3)",
            params![username, email, role.to_db_str()],
        )?;

        Ok(User {
            id: self.conn.last_insert_rowid(),
            username: username.to_string(),
            email: email.map(str::to_string),
            role,
        })
    }

    /// Remove a user; returns false when nobody had that name.
    pub fn delete_user(&self, username: &str) -> AppResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM users WHERE username = ?1", [username])?;
        Ok(n > 0)
    }

    pub fn list_users(&self) -> AppResult<Vec<User>> {
        self.query_users(
            "SELECT id, username, email, role FROM users ORDER BY role ASC, username ASC",
            [],
        )
    }
}

impl RecordStore for SqliteStore<'_> {
    fn find(&self, kind: MetricKind, date: NaiveDate) -> AppResult<Option<MetricRecord>> {
        self.query_one(
            &format!(
                "SELECT {RECORD_COLUMNS} FROM metric_records
                 WHERE kind = ?1 AND date = ?2
                 ORDER BY sub_key ASC LIMIT 1"
            ),
            params![kind.to_db_str(), fmt_date(date)],
        )
    }

    fn find_keyed(
        &self,
        kind: MetricKind,
        date: NaiveDate,
        sub_key: &str,
    ) -> AppResult<Option<MetricRecord>> {
        self.query_one(
            &format!(
                "SELECT {RECORD_COLUMNS} FROM metric_records
                 WHERE kind = ?1 AND date = ?2 AND sub_key = ?3"
            ),
            params![kind.to_db_str(), fmt_date(date), sub_key],
        )
    }

    fn find_since(&self, kind: MetricKind, from: NaiveDate) -> AppResult<Option<MetricRecord>> {
        self.query_one(
            &format!(
                "SELECT {RECORD_COLUMNS} FROM metric_records
                 WHERE kind = ?1 AND date >= ?2
                 ORDER BY date DESC, sub_key ASC LIMIT 1"
            ),
            params![kind.to_db_str(), fmt_date(from)],
        )
    }

    fn latest(&self, kind: MetricKind) -> AppResult<Option<MetricRecord>> {
        self.query_one(
            &format!(
                "SELECT {RECORD_COLUMNS} FROM metric_records
                 WHERE kind = ?1
                 ORDER BY date DESC, sub_key ASC LIMIT 1"
            ),
            [kind.to_db_str()],
        )
    }

    fn records_between(
        &self,
        kind: MetricKind,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<MetricRecord>> {
        let mut out = Vec::new();

        match bounds {
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {RECORD_COLUMNS} FROM metric_records
                     WHERE kind = ?1
                     ORDER BY date ASC, sub_key ASC"
                ))?;
                let rows = stmt.query_map([kind.to_db_str()], map_record)?;
                for r in rows {
                    out.push(r?);
                }
            }
            Some((start, end)) => {
                let mut stmt = self.conn.prepare(&format!(
                    "SELECT {RECORD_COLUMNS} FROM metric_records
                     WHERE kind = ?1 AND date BETWEEN ?2 AND ?3
                     ORDER BY date ASC, sub_key ASC"
                ))?;
                let rows = stmt.query_map(
                    params![kind.to_db_str(), fmt_date(start), fmt_date(end)],
                    map_record,
                )?;
                for r in rows {
                    out.push(r?);
                }
            }
        }

        Ok(out)
    }

    fn upsert_all(&self, records: &[MetricRecord]) -> AppResult<()> {
        let now = Local::now().to_rfc3339();
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO metric_records (kind, date, sub_key, payload, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(kind, date, sub_key)
                 DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at",
            )?;

            for rec in records {
                let payload = serde_json::to_string(&rec.values)?;
                stmt.execute(params![
                    rec.kind.to_db_str(),
                    fmt_date(rec.date),
                    rec.sub_key,
                    payload,
                    now,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

impl UserDirectory for SqliteStore<'_> {
    fn find_by_role(&self, role: Role) -> AppResult<Option<User>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, username, email, role FROM users
             WHERE role = ?1 ORDER BY id ASC LIMIT 1",
        )?;
        Ok(stmt.query_row([role.to_db_str()], map_user).optional()?)
    }

    fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, username, email, role FROM users WHERE username = ?1")?;
        Ok(stmt.query_row([username], map_user).optional()?)
    }

    fn uploaders(&self) -> AppResult<Vec<User>> {
        self.query_users(
            "SELECT id, username, email, role FROM users
             WHERE role LIKE 'uploader_%' ORDER BY id ASC",
            [],
        )
    }
}

pub(crate) fn fmt_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn map_record(row: &Row) -> rusqlite::Result<MetricRecord> {
    let kind_str: String = row.get("kind")?;
    let kind = MetricKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidMetric(kind_str.clone())))?;

    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(1, AppError::InvalidDate(date_str.clone())))?;

    let payload: String = row.get("payload")?;
    let values: BTreeMap<String, FieldValue> =
        serde_json::from_str(&payload).map_err(|e| conversion_error(3, AppError::Payload(e)))?;

    Ok(MetricRecord {
        kind,
        date,
        sub_key: row.get("sub_key")?,
        values,
        updated_at: row.get("updated_at")?,
    })
}

fn map_user(row: &Row) -> rusqlite::Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str)
        .ok_or_else(|| conversion_error(3, AppError::InvalidRole(role_str.clone())))?;

    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
        role,
    })
}
