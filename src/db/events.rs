//! Event store for the scheduling side.

use crate::core::event_status::EventStore;
use crate::errors::AppResult;
use crate::models::scheduled_event::{EventStatus, ScheduledEvent};
use rusqlite::{Connection, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<ScheduledEvent> {
    Ok(ScheduledEvent {
        id: row.get("id")?,
        title: row.get("title")?,
        start: row.get("start")?,
        duration: row.get("duration")?,
        status: EventStatus::from(row.get::<_, String>("status")?),
    })
}

pub fn insert_event(conn: &Connection, title: &str, start: i64, duration: &str, status: &EventStatus) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO events (title, start, duration, status) VALUES (?1, ?2, ?3, ?4)",
        params![title, start, duration, status.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_events(conn: &Connection) -> AppResult<Vec<ScheduledEvent>> {
    let mut stmt = conn.prepare("SELECT * FROM events ORDER BY start ASC, id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// SQLite-backed [`EventStore`].
pub struct SqliteEventStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteEventStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl EventStore for SqliteEventStore<'_> {
    fn update_status(&mut self, event_id: i64, status: &EventStatus) -> AppResult<()> {
        let n = self.conn.execute(
            "UPDATE events SET status = ?2 WHERE id = ?1",
            params![event_id, status.as_str()],
        )?;
        if n == 0 {
            return Err(rusqlite::Error::QueryReturnedNoRows.into());
        }
        Ok(())
    }
}
