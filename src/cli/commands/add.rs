use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::classifier::classify_time_in;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_entry, new_push_id};
use crate::db::settings::load_thresholds;
use crate::db::users::get_user;
use crate::errors::{AppError, AppResult};
use crate::models::entry_type::EntryType;
use crate::models::log_entry::LogEntry;
use crate::ui::messages::success;
use crate::utils::date::{self, naive_to_ms};
use crate::utils::time::parse_time;
use chrono::Local;

/// Record a time-in or time-out.
///
/// A time-in outside the configured window is rejected; an accepted
/// time-in gets its On Time / Late badge cached right away.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        user,
        kind,
        date: date_arg,
        time,
        image,
    } = cmd
    {
        let kind = EntryType::et_from_str(kind).ok_or_else(|| AppError::InvalidEntryType(kind.clone()))?;

        let now = Local::now().naive_local();
        let day = match date_arg {
            Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => now.date(),
        };
        let clock = match time {
            Some(t) => parse_time(t).ok_or_else(|| AppError::InvalidTime(t.clone()))?,
            None => now.time(),
        };

        let pool = DbPool::new(&cfg.database)?;

        if get_user(&pool.conn, user)?.is_none() {
            return Err(AppError::UnknownUser(user.clone()));
        }

        let thresholds = load_thresholds(&pool.conn, &cfg.thresholds()?)?;
        let window = thresholds.time_window;

        if kind.is_in() && !window.contains(clock) {
            return Err(AppError::OutsideTimeWindow {
                time: clock.format("%H:%M").to_string(),
                start: window.start.to_string(),
                end: window.end.to_string(),
            });
        }

        let timestamp = naive_to_ms(day.and_time(clock), &Local);
        let mut entry = LogEntry::new(&new_push_id(), user, kind, timestamp);
        entry.image_url = image.clone();

        let mut label = String::new();
        if kind.is_in() {
            let status = classify_time_in(timestamp, thresholds.late_threshold, day, &Local);
            entry.attendance_badge = Some(status.as_badge().to_string());
            label = format!(" ({status})");
        }

        insert_entry(&pool.conn, &entry)?;

        let when = day.and_time(clock).format("%Y-%m-%d %H:%M").to_string();
        ttlog(&pool.conn, "add", user, &format!("{} at {}", kind.to_db_str(), when))?;

        success(format!("{} recorded for {} at {}{}", kind.to_db_str(), user, when, label));
    }
    Ok(())
}
