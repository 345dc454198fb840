use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users::{delete_user, get_user, load_users, upsert_user};
use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, RosterUser};
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;
use crate::utils::table::{Column, Table};
use std::fs;

/// Handle the `user` subcommand.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::User {
        add,
        role,
        first_name,
        last_name,
        email,
        picture,
        import,
        del,
        list,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if let Some(user_id) = add {
            // keep existing fields the caller did not pass
            let existing = get_user(&pool.conn, user_id)?;
            let base = existing.unwrap_or_else(|| RosterUser {
                user_id: user_id.clone(),
                role: Role::Faculty,
                first_name: String::new(),
                last_name: String::new(),
                email: String::new(),
                profile_picture_url: None,
            });

            let user = RosterUser {
                role: role.clone().map(Role::from).unwrap_or(base.role),
                first_name: first_name.clone().unwrap_or(base.first_name),
                last_name: last_name.clone().unwrap_or(base.last_name),
                email: email.clone().unwrap_or(base.email),
                profile_picture_url: picture.clone().or(base.profile_picture_url),
                user_id: base.user_id,
            };

            upsert_user(&pool.conn, &user)?;
            ttlog(&pool.conn, "user_add", &user.user_id, &user.full_name())?;
            success(format!("User {} ({}) saved", user.user_id, user.role.as_str()));
        }

        if let Some(file) = import {
            let path = expand_tilde(file);
            let content = fs::read_to_string(&path)
                .map_err(|e| AppError::fetch("roster", format!("{}: {e}", path.display())))?;
            let users: Vec<RosterUser> = serde_json::from_str(&content)
                .map_err(|e| AppError::fetch("roster", format!("malformed roster: {e}")))?;

            let tx = pool.conn.unchecked_transaction()?;
            for u in &users {
                upsert_user(&tx, u)?;
            }
            tx.commit()?;

            ttlog(&pool.conn, "user_import", &path.display().to_string(), &format!("{} users", users.len()))?;
            success(format!("Imported {} users", users.len()));
        }

        if let Some(user_id) = del {
            if delete_user(&pool.conn, user_id)? {
                ttlog(&pool.conn, "user_del", user_id, "removed from roster")?;
                success(format!("User {user_id} removed"));
            } else {
                warning(format!("No user with id {user_id}"));
            }
        }

        if *list {
            let users = load_users(&pool.conn)?;
            if users.is_empty() {
                info("No users in the roster.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID", 12),
                Column::new("ROLE", 8),
                Column::new("NAME", 24),
                Column::new("EMAIL", 28),
            ]);
            for u in users {
                table.add_row(vec![u.user_id.clone(), u.role.as_str().to_string(), u.full_name(), u.email]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}
