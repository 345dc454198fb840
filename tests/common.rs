#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, TimeZone, Utc};
use rattendlog::models::entry_type::EntryType;
use rattendlog::models::log_entry::LogEntry;
use rattendlog::models::user::{Role, Roster, RosterUser};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    let mut cmd = cargo_bin_cmd!("rattendlog");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB with two faculty members and one administrator.
pub fn init_db_with_roster(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (id, first, last, role) in [
        ("f1", "Ada", "Lovelace", "FACULTY"),
        ("f2", "Alan", "Turing", "FACULTY"),
        ("a1", "Grace", "Hopper", "ADMIN"),
    ] {
        rti()
            .args([
                "--db",
                db_path,
                "user",
                "--add",
                id,
                "--first",
                first,
                "--last",
                last,
                "--email",
                &format!("{id}@school.edu"),
                "--role",
                role,
            ])
            .assert()
            .success();
    }
}

/// Record an entry through the CLI.
pub fn add_entry(db_path: &str, user: &str, kind: &str, date: &str, time: &str) {
    rti()
        .args(["--db", db_path, "add", user, kind, "--date", date, "--time", time])
        .assert()
        .success();
}

// ---------------------------------------------------------------
// Library fixtures (UTC so results do not depend on the host zone)
// ---------------------------------------------------------------

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn ms(y: i32, m: u32, d: u32, h: u32, mi: u32) -> i64 {
    Utc.with_ymd_and_hms(y, m, d, h, mi, 0)
        .single()
        .expect("valid instant")
        .timestamp_millis()
}

pub fn time_in(id: &str, user: &str, ts: i64) -> LogEntry {
    LogEntry::new(id, user, EntryType::TimeIn, ts)
}

pub fn time_out(id: &str, user: &str, ts: i64) -> LogEntry {
    LogEntry::new(id, user, EntryType::TimeOut, ts)
}

pub fn faculty(id: &str, first: &str, last: &str) -> RosterUser {
    RosterUser {
        user_id: id.to_string(),
        role: Role::Faculty,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{id}@school.edu"),
        profile_picture_url: None,
    }
}

pub fn admin(id: &str) -> RosterUser {
    RosterUser {
        role: Role::Admin,
        ..faculty(id, "Admin", id)
    }
}

pub fn roster(ids: &[&str]) -> Roster {
    Roster::faculty(ids.iter().map(|id| faculty(id, "User", id)).collect())
}
