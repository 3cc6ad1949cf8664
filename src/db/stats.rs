use crate::db::pool::DbPool;
use crate::models::metric::MetricKind;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) USERS / OUTBOX
    //
    let users: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    let queued: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM outbox WHERE status = 'queued'",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Users:{} {}{}{}", CYAN, RESET, GREEN, users, RESET);
    println!("{}• Queued mails:{} {}{}{}", CYAN, RESET, GREEN, queued, RESET);

    //
    // 3) RECORDS PER METRIC
    //
    println!("{}• Records:{}", CYAN, RESET);
    for kind in MetricKind::ALL {
        let count: i64 = pool.conn.query_row(
            "SELECT COUNT(*) FROM metric_records WHERE kind = ?1",
            [kind.to_db_str()],
            |row| row.get(0),
        )?;
        let last: Option<String> = pool
            .conn
            .query_row(
                "SELECT MAX(date) FROM metric_records WHERE kind = ?1",
                [kind.to_db_str()],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?
            .flatten();

        let last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));
        println!(
            "    {:<28} {:>6}   last: {}",
            kind.display_name(),
            count,
            last
        );
    }

    println!();
    Ok(())
}
