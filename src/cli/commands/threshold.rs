use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::settings::{load_thresholds, save_thresholds};
use crate::db::users::resolve_principal;
use crate::errors::AppResult;
use crate::models::thresholds::{ThresholdConfig, TimeWindow};
use crate::ui::messages::{header, info, success};

fn print_thresholds(cfg: &ThresholdConfig) {
    header("Attendance thresholds");
    println!("late after : {}", cfg.late_threshold);
    println!("time window: {}", cfg.time_window);
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Threshold {
        print,
        late,
        window_start,
        window_end,
        principal,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let current = load_thresholds(&pool.conn, &cfg.thresholds()?)?;

        let wants_update = late.is_some() || window_start.is_some() || window_end.is_some();
        if !wants_update {
            if !print {
                info("Nothing to change. Use --print to show the current thresholds.");
            }
            print_thresholds(&current);
            return Ok(());
        }

        // unspecified values keep their current setting
        let mut next = current;
        if let Some(l) = late {
            next.late_threshold = l.parse()?;
        }
        let start = match window_start {
            Some(s) => s.parse()?,
            None => current.time_window.start,
        };
        let end = match window_end {
            Some(e) => e.parse()?,
            None => current.time_window.end,
        };
        next.time_window = TimeWindow::new(start, end)?;

        let admin = resolve_principal(&pool.conn, principal.as_deref())?;
        save_thresholds(&pool.conn, &admin, &next)?;

        ttlog(
            &pool.conn,
            "threshold",
            &admin.user_id,
            &format!("late {} window {}", next.late_threshold, next.time_window),
        )?;

        success("Thresholds updated.");
        if *print {
            print_thresholds(&next);
        }
    }
    Ok(())
}
