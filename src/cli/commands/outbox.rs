use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::outbox::{load_outbox, mark_all_sent};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Outbox {
        print,
        all,
        mark_sent,
    } = cmd
    else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    if *print {
        let rows = load_outbox(&pool.conn, !*all)?;
        if rows.is_empty() {
            info("📭 Outbox is empty.");
        } else {
            let mut table = Table::with_headers(&["ID", "Queued at", "To", "CC", "Subject", "Status"]);
            for r in rows {
                table.add_row(vec![
                    r.id.to_string(),
                    r.created_at,
                    r.recipient,
                    r.cc,
                    r.subject,
                    format!("{}{}{}", color_for_status(&r.status), r.status, RESET),
                ]);
            }
            print!("{}", table.render());
        }
    }

    if *mark_sent {
        let n = mark_all_sent(&pool.conn)?;
        ttlog(&pool.conn, "outbox", "sent", &format!("{n} notifications marked as sent"))?;
        success(format!("{n} notifications marked as sent."));
    }

    Ok(())
}
