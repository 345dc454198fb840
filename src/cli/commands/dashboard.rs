use crate::cli::commands::stats::format_counts;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::classifier::resolve_day_status;
use crate::core::event_status::{compute_status, reconcile_events};
use crate::core::logic::Core;
use crate::core::pairing::PairingScope;
use crate::db::events::{SqliteEventStore, load_events};
use crate::db::pool::DbPool;
use crate::db::queries::{load_entries_between, write_badges};
use crate::db::settings::load_thresholds;
use crate::db::users::load_roster;
use crate::errors::{AppError, AppResult};
use crate::models::log_entry::LogEntry;
use crate::models::thresholds::ThresholdConfig;
use crate::models::user::Roster;
use crate::ui::messages::{header, info, panel_error};
use crate::utils::date;
use crate::utils::formatting::describe_status;
use crate::utils::table::{Column, Table};
use crate::utils::time::display_time_ms;
use chrono::{Local, Utc};

/// Daily overview. Each panel loads and fails on its own: a broken
/// source shows an error in its panel and the others still render.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dashboard { date: date_arg } = cmd {
        let day = match date_arg {
            Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => date::today(),
        };

        let pool = DbPool::new(&cfg.database)?;
        let defaults = cfg.thresholds()?;

        let thresholds: AppResult<ThresholdConfig> =
            load_thresholds(&pool.conn, &defaults).map_err(|e| AppError::fetch("thresholds", e));
        let (lo, hi) = PairingScope::Day(day).bounds_ms(&Local);
        let entries: AppResult<Vec<LogEntry>> =
            load_entries_between(&pool.conn, lo, hi).map_err(|e| AppError::fetch("log entries", e));
        let roster: AppResult<Roster> = load_roster(&pool.conn).map_err(|e| AppError::fetch("roster", e));

        match &thresholds {
            Ok(t) => header(format!(
                "Dashboard {} (late after {}, window {})",
                day.format("%Y-%m-%d"),
                t.late_threshold,
                t.time_window
            )),
            Err(_) => header(format!("Dashboard {}", day.format("%Y-%m-%d"))),
        }

        let report = match (&thresholds, &entries, &roster) {
            (Ok(t), Ok(entries), Ok(roster)) => Some(Core::daily_report(entries, roster, t, day, &Local)),
            _ => None,
        };
        let late_threshold = thresholds
            .as_ref()
            .map_or(defaults.late_threshold, |t| t.late_threshold);
        let source_error = thresholds
            .as_ref()
            .err()
            .or(entries.as_ref().err())
            .or(roster.as_ref().err());

        // ---- Summary ----
        println!("\n[Summary]");
        match (&report, source_error) {
            (Some(r), _) => println!("{}", format_counts(&r.stats)),
            (None, Some(e)) => panel_error("Summary", e),
            (None, None) => {}
        }

        // ---- Late faculty ----
        println!("\n[Late faculty]");
        match (&report, source_error) {
            (Some(r), _) if r.late.is_empty() => info("Nobody was late."),
            (Some(r), _) => {
                let mut table = Table::new(vec![
                    Column::new("FACULTY", 24),
                    Column::new("TIME IN", 9),
                    Column::new("EMAIL", 28),
                ]);
                for d in &r.late {
                    table.add_row(vec![
                        d.name.clone(),
                        d.time_in.clone().unwrap_or_default(),
                        d.email.clone(),
                    ]);
                }
                print!("{}", table.render());
            }
            (None, Some(e)) => panel_error("Late faculty", e),
            (None, None) => {}
        }

        // ---- No time-in ----
        println!("\n[No time-in]");
        match (&report, source_error) {
            (Some(r), _) if r.no_time_in.is_empty() => info("Everyone timed in."),
            (Some(r), _) => {
                let status = resolve_day_status(
                    None,
                    late_threshold,
                    day,
                    Utc::now().timestamp_millis(),
                    &Local,
                );
                let mut table = Table::new(vec![
                    Column::new("FACULTY", 24),
                    Column::new("EMAIL", 28),
                    Column::new("STATUS", 10),
                ]);
                for d in &r.no_time_in {
                    table.add_row(vec![d.name.clone(), d.email.clone(), describe_status(status)]);
                }
                print!("{}", table.render());
            }
            (None, Some(e)) => panel_error("No time-in", e),
            (None, None) => {}
        }

        if let Some(r) = &report
            && let Err(e) = write_badges(&pool.conn, &Core::pending_badges(&r.records))
        {
            tracing::warn!(error = %e, "badge cache not refreshed");
        }

        // ---- Events ----
        println!("\n[Events]");
        match load_events(&pool.conn).map_err(|e| AppError::fetch("events", e)) {
            Ok(mut events) if !events.is_empty() => {
                let now = Utc::now().timestamp_millis();
                let mut store = SqliteEventStore::new(&pool.conn);
                reconcile_events(&mut store, &mut events, now);

                for ev in &events {
                    let current = compute_status(ev, now)
                        .map(|s| s.as_str().to_string())
                        .unwrap_or_else(|| ev.status.as_str().to_string());
                    println!(
                        "- {} | {} {} | {}",
                        ev.title,
                        date::display_date_ms(ev.start, &Local),
                        display_time_ms(ev.start, &Local),
                        current
                    );
                }
            }
            Ok(_) => info("No events scheduled."),
            Err(e) => panel_error("Events", e),
        }
    }
    Ok(())
}
