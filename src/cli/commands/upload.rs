use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::upload::UploadLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::date::{date_or_today, short_label};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Upload { user, date, fields } = cmd else {
        return Ok(());
    };

    let today = date_or_today(date.as_deref())?;
    let raw = UploadLogic::parse_assignments(fields)?;

    let pool = DbPool::new(&cfg.database)?;
    let store = SqliteStore::new(&pool.conn);

    let outcome = UploadLogic::submit(&store, &store, user, today, &cfg.banks, &raw)?;

    if !outcome.ignored.is_empty() {
        warning(format!(
            "Ignored keys not used by role {}: {}",
            outcome.user.role,
            outcome.ignored.join(", ")
        ));
    }

    let mut names: Vec<&str> = outcome.records.iter().map(|r| r.kind.display_name()).collect();
    names.dedup();

    ttlog(
        &pool.conn,
        "upload",
        outcome.user.role.code(),
        &format!(
            "{} uploaded {} for {} ({} records)",
            outcome.user.username,
            names.join(", "),
            outcome.effective_date,
            outcome.records.len()
        ),
    )?;

    success(format!(
        "Data uploaded successfully for {}",
        short_label(outcome.effective_date)
    ));
    Ok(())
}
