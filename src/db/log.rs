//! Audit trail writer: uploads, compliance runs, violations, failed
//! notifications, reminders and user changes all land in the `log` table.

use crate::errors::AppResult;
use chrono::{Local, SecondsFormat};
use rusqlite::Connection;
use rusqlite::params;

/// Write an internal log line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);

    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![now, operation, target, message])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;

    #[test]
    fn rows_keep_operation_and_target() {
        let pool = DbPool::in_memory().unwrap();
        ttlog(&pool.conn, "notify_failed", "sales@example.com", "relay refused").unwrap();

        let (op, target): (String, String) = pool
            .conn
            .query_row(
                "SELECT operation, target FROM log WHERE operation = 'notify_failed'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(op, "notify_failed");
        assert_eq!(target, "sales@example.com");
    }
}
