//! Threshold store: readable by anyone, writable by administrators only.

use crate::errors::{AppError, AppResult};
use crate::models::thresholds::ThresholdConfig;
use crate::models::user::RosterUser;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

const KEY_LATE: &str = "lateThreshold";
const KEY_WINDOW: &str = "timeWindow";

#[derive(serde::Serialize, serde::Deserialize)]
struct WindowValue {
    start: String,
    end: String,
}

fn get(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let v = conn
        .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| row.get(0))
        .optional()?;
    Ok(v)
}

fn put(conn: &Connection, key: &str, value: &str, updated_by: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO settings (key, value, updated_by, updated_at) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_by = excluded.updated_by,
            updated_at = excluded.updated_at",
        params![key, value, updated_by, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Current thresholds. Keys that are missing or unreadable fall back to
/// `defaults` one by one.
pub fn load_thresholds(conn: &Connection, defaults: &ThresholdConfig) -> AppResult<ThresholdConfig> {
    let mut cfg = *defaults;

    if let Some(raw) = get(conn, KEY_LATE)? {
        match raw.parse() {
            Ok(t) => cfg.late_threshold = t,
            Err(e) => tracing::warn!(value = %raw, error = %e, "stored late threshold ignored"),
        }
    }

    if let Some(raw) = get(conn, KEY_WINDOW)? {
        let parsed = serde_json::from_str::<WindowValue>(&raw)
            .map_err(AppError::from)
            .and_then(|w| ThresholdConfig::from_strings(&cfg.late_threshold.to_string(), &w.start, &w.end));
        match parsed {
            Ok(p) => cfg.time_window = p.time_window,
            Err(e) => tracing::warn!(value = %raw, error = %e, "stored time window ignored"),
        }
    }

    Ok(cfg)
}

fn write_all(conn: &Connection, cfg: &ThresholdConfig, updated_by: &str) -> AppResult<()> {
    let window = serde_json::to_string(&WindowValue {
        start: cfg.time_window.start.to_string(),
        end: cfg.time_window.end.to_string(),
    })?;

    let tx = conn.unchecked_transaction()?;
    put(&tx, KEY_LATE, &cfg.late_threshold.to_string(), updated_by)?;
    put(&tx, KEY_WINDOW, &window, updated_by)?;
    tx.commit()?;
    Ok(())
}

/// Save thresholds on behalf of `principal`. Non-admins get a
/// permission error and nothing is written. Last write wins.
pub fn save_thresholds(conn: &Connection, principal: &RosterUser, cfg: &ThresholdConfig) -> AppResult<()> {
    if !principal.role.is_admin() {
        return Err(AppError::admin_only());
    }
    write_all(conn, cfg, &principal.user_id)
}

/// Store `cfg` unless thresholds were already saved (first-run seeding).
pub fn seed_thresholds(conn: &Connection, cfg: &ThresholdConfig) -> AppResult<bool> {
    if get(conn, KEY_LATE)?.is_some() {
        return Ok(false);
    }
    write_all(conn, cfg, "init")?;
    Ok(true)
}
