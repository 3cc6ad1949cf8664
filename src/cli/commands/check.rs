use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::compliance::{CheckerSettings, ComplianceChecker, ComplianceRun, Violation};
use crate::db::log::ttlog;
use crate::db::outbox::OutboxNotifier;
use crate::db::pool::DbPool;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{header, success, warning};
use crate::utils::date::date_or_today;
use crate::utils::table::Table;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Check { date, dry_run } = cmd else {
        return Ok(());
    };

    let today = date_or_today(date.as_deref())?;
    let pool = DbPool::new(&cfg.database)?;

    if *dry_run {
        let store = SqliteStore::new(&pool.conn);
        let notifier = OutboxNotifier::new(&pool.conn, &cfg.mail_sender);
        let checker =
            ComplianceChecker::new(&store, &store, &notifier, CheckerSettings::from_config(cfg));
        let violations = checker.find_violations(today)?;
        report(today, &violations);
        return Ok(());
    }

    let run = run_check(&pool, cfg, today)?;
    report(today, &run.violations);
    if !run.violations.is_empty() {
        success(format!("{} notifications queued.", run.delivered()));
    }
    Ok(())
}

/// Full compliance pass with audit trail; shared with the scheduler.
pub(crate) fn run_check(pool: &DbPool, cfg: &Config, today: NaiveDate) -> AppResult<ComplianceRun> {
    let store = SqliteStore::new(&pool.conn);
    let notifier = OutboxNotifier::new(&pool.conn, &cfg.mail_sender);
    let checker =
        ComplianceChecker::new(&store, &store, &notifier, CheckerSettings::from_config(cfg));

    let run = checker.check_compliance(today)?;

    for v in &run.violations {
        ttlog(
            &pool.conn,
            "violation",
            v.entry.kind.to_db_str(),
            &format!("{} missing {} ({})", v.entry.name, v.period, v.check_type()),
        )?;
    }
    for d in run.failed() {
        ttlog(
            &pool.conn,
            "notify_failed",
            &d.to,
            &format!("{}: {}", d.subject, d.error.as_deref().unwrap_or("unknown error")),
        )?;
    }
    ttlog(
        &pool.conn,
        "check",
        &today.to_string(),
        &format!(
            "{} violations, {} notifications queued, {} failed",
            run.violations.len(),
            run.delivered(),
            run.failed().count()
        ),
    )?;

    Ok(run)
}

fn report(today: NaiveDate, violations: &[Violation]) {
    if violations.is_empty() {
        success(format!("All submissions present for {}.", today));
        return;
    }

    header(format!("Missing submissions for {}", today));
    let mut table = Table::with_headers(&["Metric", "Role", "Cadence", "Check", "Expected"]);
    for v in violations {
        table.add_row(vec![
            v.entry.name.to_string(),
            v.entry.role.code().to_string(),
            v.entry.cadence.to_string(),
            v.check_type().to_string(),
            v.period.clone(),
        ]);
    }
    print!("{}", table.render());
    warning(format!("{} violation(s) found.", violations.len()));
}
