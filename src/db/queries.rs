//! Log store access: the append-only stream of TimeIn/TimeOut entries.

use crate::errors::AppResult;
use crate::models::entry_type::EntryType;
use crate::models::log_entry::LogEntry;
use chrono::Utc;
use rusqlite::{Connection, Row, params};
use std::sync::atomic::{AtomicU32, Ordering};

const SELECT_ENTRIES: &str =
    "SELECT id, user_id, kind, timestamp, image_url, attendance_badge FROM log_entries";

static PUSH_SEQ: AtomicU32 = AtomicU32::new(0);

/// Time-ordered unique id for a new entry: creation instant in
/// nanoseconds plus a per-process counter.
pub fn new_push_id() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let seq = PUSH_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("-{:016x}{:04x}", nanos, seq & 0xffff)
}

/// Map a row; rows with an unknown kind are skipped (logged), not fatal.
fn map_row(row: &Row) -> rusqlite::Result<Option<LogEntry>> {
    let kind_str: String = row.get("kind")?;
    let Some(kind) = EntryType::from_db_str(&kind_str) else {
        let id: String = row.get("id")?;
        tracing::warn!(entry = %id, kind = %kind_str, "log entry with unknown kind skipped");
        return Ok(None);
    };

    Ok(Some(LogEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        kind,
        timestamp: row.get("timestamp")?,
        image_url: row.get("image_url")?,
        attendance_badge: row.get("attendance_badge")?,
    }))
}

fn collect(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        if let Some(entry) = r? {
            out.push(entry);
        }
    }
    Ok(out)
}

/// Every entry of every user (dashboard view).
pub fn load_entries(conn: &Connection) -> AppResult<Vec<LogEntry>> {
    collect(conn, &format!("{SELECT_ENTRIES} ORDER BY timestamp ASC"), [])
}

/// Every entry of one user (mobile view).
pub fn load_entries_for_user(conn: &Connection, user_id: &str) -> AppResult<Vec<LogEntry>> {
    collect(
        conn,
        &format!("{SELECT_ENTRIES} WHERE user_id = ?1 ORDER BY timestamp ASC"),
        [user_id],
    )
}

/// Entries with `lo <= timestamp <= hi`.
pub fn load_entries_between(conn: &Connection, lo: i64, hi: i64) -> AppResult<Vec<LogEntry>> {
    collect(
        conn,
        &format!("{SELECT_ENTRIES} WHERE timestamp BETWEEN ?1 AND ?2 ORDER BY timestamp ASC"),
        params![lo, hi],
    )
}

pub fn insert_entry(conn: &Connection, entry: &LogEntry) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log_entries (id, user_id, kind, timestamp, image_url, attendance_badge)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.id,
            entry.user_id,
            entry.kind.to_db_str(),
            entry.timestamp,
            entry.image_url,
            entry.attendance_badge,
        ],
    )?;
    Ok(())
}

/// Cache a computed status on a time-in entry. Writing the same badge
/// twice is a no-op; returns whether a row changed.
pub fn write_badge(conn: &Connection, entry_id: &str, badge: &str) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE log_entries SET attendance_badge = ?2
         WHERE id = ?1 AND kind = 'TimeIn' AND attendance_badge IS NOT ?2",
        params![entry_id, badge],
    )?;
    Ok(changed > 0)
}

/// Write a batch of badges, returning how many rows changed.
pub fn write_badges(conn: &Connection, badges: &[(String, &str)]) -> AppResult<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut changed = 0;
    for (id, badge) in badges {
        if write_badge(&tx, id, badge)? {
            changed += 1;
        }
    }
    tx.commit()?;
    Ok(changed)
}

