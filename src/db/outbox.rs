//! Outbox: notifications queued in SQLite for the mail relay.

use crate::core::notify::{Notification, Notifier, NotifyError};
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};

pub struct OutboxNotifier<'a> {
    conn: &'a Connection,
    sender: String,
}

impl<'a> OutboxNotifier<'a> {
    pub fn new(conn: &'a Connection, sender: impl Into<String>) -> Self {
        Self {
            conn,
            sender: sender.into(),
        }
    }
}

impl Notifier for OutboxNotifier<'_> {
    fn send(&self, message: &Notification) -> Result<(), NotifyError> {
        if message.to.trim().is_empty() {
            return Err(NotifyError::NoRecipient);
        }

        self.conn
            .execute(
                "INSERT INTO outbox (created_at, sender, recipient, cc, subject, body)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    Local::now().to_rfc3339(),
                    self.sender,
                    message.to,
                    message.cc.join(", "),
                    message.subject,
                    message.body,
                ],
            )
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct OutboxRow {
    pub id: i64,
    pub created_at: String,
    pub recipient: String,
    pub cc: String,
    pub subject: String,
    pub status: String,
}

/// Queued and sent messages, newest first.
pub fn load_outbox(conn: &Connection, only_queued: bool) -> AppResult<Vec<OutboxRow>> {
    let sql = if only_queued {
        "SELECT id, created_at, recipient, cc, subject, status FROM outbox
         WHERE status = 'queued' ORDER BY id DESC"
    } else {
        "SELECT id, created_at, recipient, cc, subject, status FROM outbox ORDER BY id DESC"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(OutboxRow {
            id: row.get(0)?,
            created_at: row.get(1)?,
            recipient: row.get(2)?,
            cc: row.get(3)?,
            subject: row.get(4)?,
            status: row.get(5)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Mark queued messages as handed over to the relay.
pub fn mark_all_sent(conn: &Connection) -> AppResult<usize> {
    Ok(conn.execute("UPDATE outbox SET status = 'sent' WHERE status = 'queued'", [])?)
}
