use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reminder::{ReminderRun, send_reminders};
use crate::db::log::ttlog;
use crate::db::outbox::OutboxNotifier;
use crate::db::pool::DbPool;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Remind) {
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;
    let run = run_reminders(&pool, cfg)?;

    success(format!("{} reminders queued.", run.sent));
    if run.skipped > 0 {
        info(format!("{} uploaders have no email address.", run.skipped));
    }
    Ok(())
}

/// Queue the morning reminder and record it in the audit log.
pub(crate) fn run_reminders(pool: &DbPool, cfg: &Config) -> AppResult<ReminderRun> {
    let store = SqliteStore::new(&pool.conn);
    let notifier = OutboxNotifier::new(&pool.conn, &cfg.mail_sender);

    let run = send_reminders(&store, &notifier, &cfg.cc_list())?;

    ttlog(
        &pool.conn,
        "remind",
        "uploaders",
        &format!(
            "{} sent, {} failed, {} without email",
            run.sent, run.failed, run.skipped
        ),
    )?;
    Ok(run)
}
