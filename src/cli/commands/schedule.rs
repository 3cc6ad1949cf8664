use crate::cli::commands::check::run_check;
use crate::cli::commands::remind::run_reminders;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::schedule::{Job, next_job};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};
use chrono::Local;
use std::thread;

/// Run forever, firing the reminder and the overdue check once a day.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Schedule) {
        return Ok(());
    }

    let reminder_at = cfg.reminder_clock()?;
    let overdue_at = cfg.overdue_clock()?;

    info(format!(
        "Scheduler started: reminder at {}, overdue check at {}",
        reminder_at.format("%H:%M"),
        overdue_at.format("%H:%M")
    ));

    loop {
        let now = Local::now().naive_local();
        let (at, job) = next_job(now, reminder_at, overdue_at);
        info(format!("Next job: {} at {}", job.name(), at.format("%Y-%m-%d %H:%M")));

        if let Ok(wait) = (at - now).to_std() {
            thread::sleep(wait);
        }

        // A failed run is reported and the loop goes on to the next slot.
        if let Err(e) = fire(cfg, job, at.date()) {
            error(format!("{} failed: {}", job.name(), e));
        }
    }
}

fn fire(cfg: &Config, job: Job, today: chrono::NaiveDate) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    match job {
        Job::Reminder => {
            let run = run_reminders(&pool, cfg)?;
            success(format!("Reminders queued: {}", run.sent));
        }
        Job::OverdueCheck => {
            let run = run_check(&pool, cfg, today)?;
            success(format!(
                "Overdue check for {}: {} violations, {} notifications",
                today,
                run.violations.len(),
                run.delivered()
            ));
        }
    }
    Ok(())
}
