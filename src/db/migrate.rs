use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

/// Ordered schema steps. Each step runs once, inside a transaction.
const MIGRATIONS: &[(i64, &str, &str)] = &[
    (
        1,
        "create_log_entries",
        r#"
        CREATE TABLE IF NOT EXISTS log_entries (
            id                TEXT PRIMARY KEY,
            user_id           TEXT NOT NULL,
            kind              TEXT NOT NULL CHECK(kind IN ('TimeIn','TimeOut')),
            timestamp         INTEGER NOT NULL,
            image_url         TEXT,
            attendance_badge  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_log_entries_user_ts ON log_entries(user_id, timestamp);
        CREATE INDEX IF NOT EXISTS idx_log_entries_ts ON log_entries(timestamp);
        "#,
    ),
    (
        2,
        "create_users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id              TEXT PRIMARY KEY,
            role                 TEXT NOT NULL DEFAULT 'FACULTY',
            first_name           TEXT NOT NULL DEFAULT '',
            last_name            TEXT NOT NULL DEFAULT '',
            email                TEXT NOT NULL DEFAULT '',
            profile_picture_url  TEXT
        );
        "#,
    ),
    (
        3,
        "create_settings",
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key         TEXT PRIMARY KEY,
            value       TEXT NOT NULL,
            updated_by  TEXT NOT NULL DEFAULT '',
            updated_at  TEXT NOT NULL DEFAULT ''
        );
        "#,
    ),
    (
        4,
        "create_events",
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            title     TEXT NOT NULL,
            start     INTEGER NOT NULL,
            duration  TEXT NOT NULL,
            status    TEXT NOT NULL DEFAULT 'Upcoming'
        );
        "#,
    ),
];

/// Ensure that the `log` table exists. It is created outside the
/// versioned steps because migrations log into it.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            applied_at  TEXT NOT NULL
        );
        "#,
    )
}

fn current_version(conn: &Connection) -> rusqlite::Result<i64> {
    let v: Option<i64> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
        .optional()?
        .flatten();
    Ok(v.unwrap_or(0))
}

/// Apply every migration newer than the stored schema version.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;
    let current = current_version(conn)?;

    for (version, name, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)
            .map_err(|e| AppError::Migration(format!("{name}: {e}")))?;
        tx.execute(
            "INSERT INTO schema_version (version, name, applied_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![version, name, chrono::Local::now().to_rfc3339()],
        )?;
        tx.commit()?;

        tracing::debug!(version, name, "migration applied");
        ttlog(conn, "migration_applied", name, &format!("schema version {version}"))?;
    }

    Ok(())
}

pub fn schema_version(conn: &Connection) -> AppResult<i64> {
    Ok(current_version(conn)?)
}
