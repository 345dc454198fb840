use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::migrate::schema_version;
use crate::db::pool::DbPool;
use crate::db::settings::seed_thresholds;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped with --test)
///  - the SQLite database and its schema
///  - the threshold settings, seeded from the config file
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;

    info(format!("Config file : {}", Config::config_file().display()));
    info(format!("Database    : {}", db_path));

    let pool = DbPool::new(&db_path)?;
    info(format!("Schema      : version {}", schema_version(&pool.conn)?));

    let thresholds = cfg.thresholds()?;
    if seed_thresholds(&pool.conn, &thresholds)? {
        info(format!(
            "Thresholds  : late after {}, time-in window {}",
            thresholds.late_threshold, thresholds.time_window
        ));
    }

    if let Err(e) = ttlog(
        &pool.conn,
        "init",
        "database",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success(format!("Database initialized at {}", &db_path));
    Ok(())
}
