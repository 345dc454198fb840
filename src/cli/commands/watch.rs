use crate::cli::commands::stats::format_counts;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pairing::{PairingScope, pair_logs};
use crate::core::stats::aggregate;
use crate::core::watch::{RequestToken, RequestTokens, Subscription};
use crate::db::pool::DbPool;
use crate::db::queries::load_entries_between;
use crate::db::settings::load_thresholds;
use crate::db::users::load_roster;
use crate::errors::{AppError, AppResult};
use crate::models::log_entry::LogEntry;
use crate::models::stats::AttendanceStats;
use crate::models::thresholds::ThresholdConfig;
use crate::models::user::Roster;
use crate::ui::messages::{header, info};
use crate::utils::date;
use chrono::Local;
use crossbeam::channel::{self, select};
use std::thread;
use std::time::Duration;

/// Follow the stores and print the day's counts whenever the logs, the
/// roster or the thresholds change. Each recomputation runs on its own
/// worker; a result is printed only if no newer input arrived meanwhile.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch {
        date: date_arg,
        count,
        interval_ms,
    } = cmd
    {
        let day = match date_arg {
            Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => date::today(),
        };
        let interval = Duration::from_millis(interval_ms.unwrap_or(cfg.watch_interval_ms).max(50));
        let defaults = cfg.thresholds()?;

        // make sure the schema exists before the pollers open their own connections
        drop(DbPool::new(&cfg.database)?);

        let (lo, hi) = PairingScope::Day(day).bounds_ms(&Local);

        let logs_pool = DbPool::open_existing(&cfg.database)?;
        let logs: Subscription<Vec<LogEntry>> =
            Subscription::spawn(interval, move || load_entries_between(&logs_pool.conn, lo, hi));

        let roster_pool = DbPool::open_existing(&cfg.database)?;
        let rosters: Subscription<Roster> = Subscription::spawn(interval, move || load_roster(&roster_pool.conn));

        let settings_pool = DbPool::open_existing(&cfg.database)?;
        let settings: Subscription<ThresholdConfig> =
            Subscription::spawn(interval, move || load_thresholds(&settings_pool.conn, &defaults));

        header(format!("Watching {} (Ctrl+C to stop)", day.format("%Y-%m-%d")));

        let tokens = RequestTokens::new();
        let (results_tx, results_rx) = channel::unbounded::<(RequestToken, AttendanceStats)>();

        let mut entries: Option<Vec<LogEntry>> = None;
        let mut roster: Option<Roster> = None;
        let mut thresholds: Option<ThresholdConfig> = None;
        let mut printed = 0usize;

        loop {
            select! {
                recv(logs.receiver()) -> msg => match msg {
                    Ok(s) => entries = Some(s.data),
                    Err(_) => break,
                },
                recv(rosters.receiver()) -> msg => match msg {
                    Ok(s) => roster = Some(s.data),
                    Err(_) => break,
                },
                recv(settings.receiver()) -> msg => match msg {
                    Ok(s) => thresholds = Some(s.data),
                    Err(_) => break,
                },
                recv(results_rx) -> msg => {
                    if let Ok((token, stats)) = msg
                        && let Some(stats) = tokens.accept(token, stats)
                    {
                        println!("[{}] {}", Local::now().format("%H:%M:%S"), format_counts(&stats));
                        printed += 1;
                        if count.is_some_and(|n| printed >= n) {
                            break;
                        }
                    }
                    continue;
                },
            }

            let (Some(e), Some(r), Some(t)) = (&entries, &roster, &thresholds) else {
                continue;
            };

            let token = tokens.issue();
            let tx = results_tx.clone();
            let (e, r, late) = (e.clone(), r.clone(), t.late_threshold);
            thread::spawn(move || {
                let pairings = pair_logs(&e, &PairingScope::Day(day), &Local);
                let stats = aggregate(&r, &pairings, late, day, &Local);
                let _ = tx.send((token, stats));
            });
        }

        logs.cancel();
        rosters.cancel();
        settings.cancel();
        info("Watch stopped.");
    }
    Ok(())
}
