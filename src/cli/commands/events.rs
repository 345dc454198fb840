use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::event_status::{compute_status, reconcile_events};
use crate::db::events::{SqliteEventStore, insert_event, load_events};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::scheduled_event::EventStatus;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::date::{display_date_ms, naive_to_ms};
use crate::utils::formatting::mins2readable;
use crate::utils::table::{Column, Table};
use crate::utils::time::{display_time_ms, parse_duration_minutes};
use chrono::{Local, NaiveDateTime, Utc};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Events {
        add,
        start,
        duration,
        list,
        sync,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if let Some(title) = add {
            let raw_start = start
                .as_deref()
                .ok_or_else(|| AppError::InvalidDate("missing --start".to_string()))?;
            let naive = NaiveDateTime::parse_from_str(raw_start.trim(), "%Y-%m-%d %H:%M")
                .map_err(|_| AppError::InvalidDate(raw_start.to_string()))?;
            let duration = duration.as_deref().unwrap_or("1h");

            if parse_duration_minutes(duration).is_none() {
                warning(format!(
                    "Duration '{duration}' is not recognized; the status of this event will not be tracked."
                ));
            }

            let start_ms = naive_to_ms(naive, &Local);
            let id = insert_event(&pool.conn, title, start_ms, duration, &EventStatus::Upcoming)?;
            ttlog(&pool.conn, "event_add", title, &format!("#{id} at {raw_start} for {duration}"))?;
            success(format!("Event #{id} '{title}' scheduled."));
        }

        if *sync {
            let mut events = load_events(&pool.conn)?;
            let mut store = SqliteEventStore::new(&pool.conn);
            let report = reconcile_events(&mut store, &mut events, Utc::now().timestamp_millis());

            ttlog(
                &pool.conn,
                "event_sync",
                "",
                &format!(
                    "checked {} corrected {} failed {} skipped {}",
                    report.checked, report.corrected, report.failed, report.skipped
                ),
            )?;

            if report.failed > 0 {
                warning(format!("{} event(s) could not be updated.", report.failed));
            }
            success(format!(
                "Checked {} event(s), corrected {}, skipped {}.",
                report.checked, report.corrected, report.skipped
            ));
        }

        if *list || (add.is_none() && !*sync) {
            let events = load_events(&pool.conn)?;
            if events.is_empty() {
                info("No events scheduled.");
                return Ok(());
            }

            let now = Utc::now().timestamp_millis();
            let mut table = Table::new(vec![
                Column::new("ID", 4),
                Column::new("TITLE", 28),
                Column::new("DATE", 10),
                Column::new("START", 5),
                Column::new("DURATION", 8),
                Column::new("STORED", 10),
                Column::new("CURRENT", 10),
            ]);

            for ev in &events {
                let duration = parse_duration_minutes(&ev.duration)
                    .map(|m| mins2readable(m, false, true))
                    .unwrap_or_else(|| ev.duration.clone());
                let current = compute_status(ev, now)
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_else(|| "?".to_string());

                table.add_row(vec![
                    ev.id.to_string(),
                    ev.title.clone(),
                    display_date_ms(ev.start, &Local),
                    display_time_ms(ev.start, &Local),
                    duration,
                    ev.status.as_str().to_string(),
                    current,
                ]);
            }

            header("Scheduled events");
            print!("{}", table.render());
        }
    }
    Ok(())
}
