use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        metric,
        format,
        file,
        range,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let store = SqliteStore::new(&pool.conn);

        let n = ExportLogic::export(&store, *metric, *format, file, range.as_deref(), *force)?;

        if n > 0 {
            ttlog(
                &pool.conn,
                "export",
                metric.to_db_str(),
                &format!("{} records exported as {} to {}", n, format.as_str(), file),
            )?;
        }
    }
    Ok(())
}
