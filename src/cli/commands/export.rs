use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::settings::load_thresholds;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        let thresholds = load_thresholds(&pool.conn, &cfg.thresholds()?)?;

        let rows = ExportLogic::export(&mut pool, &thresholds, *format, file, range, *force)?;

        ttlog(
            &pool.conn,
            "export",
            file,
            &format!("{} rows, range {}", rows, range.as_deref().unwrap_or("all")),
        )?;
    }
    Ok(())
}
