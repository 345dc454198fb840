//! Roster source: users with their role and contact details.

use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, Roster, RosterUser};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<RosterUser> {
    Ok(RosterUser {
        user_id: row.get("user_id")?,
        role: Role::from(row.get::<_, String>("role")?),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        profile_picture_url: row.get("profile_picture_url")?,
    })
}

pub fn upsert_user(conn: &Connection, user: &RosterUser) -> AppResult<()> {
    conn.execute(
        "INSERT INTO users (user_id, role, first_name, last_name, email, profile_picture_url)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(user_id) DO UPDATE SET
            role = excluded.role,
            first_name = excluded.first_name,
            last_name = excluded.last_name,
            email = excluded.email,
            profile_picture_url = excluded.profile_picture_url",
        params![
            user.user_id,
            user.role.as_str(),
            user.first_name,
            user.last_name,
            user.email,
            user.profile_picture_url,
        ],
    )?;
    Ok(())
}

/// Every user, admins included, ordered by name.
pub fn load_users(conn: &Connection) -> AppResult<Vec<RosterUser>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM users ORDER BY last_name COLLATE NOCASE, first_name COLLATE NOCASE, user_id",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_user(conn: &Connection, user_id: &str) -> AppResult<Option<RosterUser>> {
    let user = conn
        .query_row("SELECT * FROM users WHERE user_id = ?1", [user_id], map_row)
        .optional()?;
    Ok(user)
}

/// Roster of the users expected to attend (admins excluded).
pub fn load_roster(conn: &Connection) -> AppResult<Roster> {
    Ok(Roster::faculty(load_users(conn)?))
}

/// Resolve the acting user for a privileged write. A missing or unknown
/// principal is a permission failure, not a lookup failure.
pub fn resolve_principal(conn: &Connection, user_id: Option<&str>) -> AppResult<RosterUser> {
    let id = user_id.ok_or_else(AppError::admin_only)?;
    get_user(conn, id)?.ok_or_else(AppError::admin_only)
}

pub fn delete_user(conn: &Connection, user_id: &str) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM users WHERE user_id = ?1", [user_id])?;
    Ok(n > 0)
}
