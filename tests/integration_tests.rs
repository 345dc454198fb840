use predicates::prelude::PredicateBooleanExt;
use predicates::str::{RegexPredicate, contains, is_match};
use std::fs;

mod common;
use common::{add_entry, init_db_with_roster, rti, setup_test_db, temp_out};

#[test]
fn test_list_day_shows_pairings_with_status() {
    let db_path = setup_test_db("list_day");
    init_db_with_roster(&db_path);

    add_entry(&db_path, "f1", "in", "2025-08-01", "08:00");
    add_entry(&db_path, "f1", "out", "2025-08-01", "17:00");
    add_entry(&db_path, "f2", "in", "2025-08-01", "09:15");

    rti()
        .args(["--db", &db_path, "list", "--date", "2025-08-01"])
        .assert()
        .success()
        .stdout(contains("2025-08-01"))
        .stdout(contains("Ada Lovelace"))
        .stdout(contains("Alan Turing"))
        .stdout(contains("On Time"))
        .stdout(contains("Late"))
        .stdout(contains("active"))
        .stdout(contains("Grace Hopper").not());
}

#[test]
fn test_add_reports_the_badge() {
    let db_path = setup_test_db("add_badge");
    init_db_with_roster(&db_path);

    rti()
        .args(["--db", &db_path, "add", "f2", "in", "--date", "2025-08-01", "--time", "09:15"])
        .assert()
        .success()
        .stdout(contains("TimeIn recorded for f2"))
        .stdout(contains("(Late)"));
}

#[test]
fn test_double_time_in_keeps_the_later_entry() {
    let db_path = setup_test_db("double_time_in");
    init_db_with_roster(&db_path);

    add_entry(&db_path, "f1", "in", "2025-08-01", "08:00");
    add_entry(&db_path, "f1", "in", "2025-08-01", "08:30");
    add_entry(&db_path, "f1", "out", "2025-08-01", "17:00");

    rti()
        .args(["--db", &db_path, "list", "--date", "2025-08-01"])
        .assert()
        .success()
        .stdout(contains("08:30"))
        .stdout(contains("08:00").not());
}

#[test]
fn test_time_in_outside_window_is_rejected() {
    let db_path = setup_test_db("outside_window");
    init_db_with_roster(&db_path);

    rti()
        .args(["--db", &db_path, "add", "f1", "in", "--date", "2025-08-01", "--time", "11:30"])
        .assert()
        .failure()
        .stderr(contains("outside the allowed window 06:00-10:00"));

    // time-outs are not gated
    add_entry(&db_path, "f1", "out", "2025-08-01", "18:00");
}

#[test]
fn test_add_for_unknown_user_fails() {
    let db_path = setup_test_db("unknown_user");
    init_db_with_roster(&db_path);

    rti()
        .args(["--db", &db_path, "add", "nobody", "in", "--date", "2025-08-01", "--time", "08:00"])
        .assert()
        .failure()
        .stderr(contains("Unknown user: nobody"));
}

#[test]
fn test_stats_day_counts_roster_members() {
    let db_path = setup_test_db("stats_day");
    init_db_with_roster(&db_path);

    add_entry(&db_path, "f1", "in", "2025-08-01", "08:30");
    add_entry(&db_path, "f2", "in", "2025-08-01", "09:15");
    add_entry(&db_path, "a1", "in", "2025-08-01", "07:00");

    rti()
        .args(["--db", &db_path, "stats", "--date", "2025-08-01"])
        .assert()
        .success()
        .stdout(contains("present: 1  late: 1  absent: 0  total: 2"));
}

#[test]
fn test_stats_absent_member() {
    let db_path = setup_test_db("stats_absent");
    init_db_with_roster(&db_path);

    add_entry(&db_path, "f1", "in", "2025-08-01", "08:00");

    rti()
        .args(["--db", &db_path, "stats", "--date", "2025-08-01"])
        .assert()
        .success()
        .stdout(contains("present: 1  late: 0  absent: 1  total: 2"));
}

#[test]
fn test_stats_range() {
    let db_path = setup_test_db("stats_range");
    init_db_with_roster(&db_path);

    add_entry(&db_path, "f1", "in", "2025-08-01", "08:00");
    add_entry(&db_path, "f2", "in", "2025-08-02", "09:30");

    rti()
        .args(["--db", &db_path, "stats", "--from", "2025-08-01", "--to", "2025-08-02"])
        .assert()
        .success()
        .stdout(contains("2025-08-01  present: 1  late: 0  absent: 1"))
        .stdout(contains("2025-08-02  present: 0  late: 1  absent: 1"))
        .stdout(contains("TOTAL"))
        .stdout(contains("present: 1  late: 1  absent: 2  total: 4"));
}

#[test]
fn test_stats_invalid_range() {
    let db_path = setup_test_db("stats_invalid_range");
    init_db_with_roster(&db_path);

    rti()
        .args(["--db", &db_path, "stats", "--from", "2025-08-10", "--to", "2025-08-05"])
        .assert()
        .failure()
        .stderr(contains("Invalid range: start date 2025-08-10 is after end date 2025-08-05"));
}

#[test]
fn test_threshold_requires_admin() {
    let db_path = setup_test_db("threshold_permission");
    init_db_with_roster(&db_path);

    rti()
        .args(["--db", &db_path, "threshold", "--late", "08:00", "--as", "f1"])
        .assert()
        .failure()
        .stderr(contains("Only administrators can modify this setting"));

    rti()
        .args(["--db", &db_path, "threshold", "--late", "08:00"])
        .assert()
        .failure()
        .stderr(contains("Only administrators can modify this setting"));

    rti()
        .args(["--db", &db_path, "threshold", "--print"])
        .assert()
        .success()
        .stdout(contains("late after : 09:00"));
}

#[test]
fn test_threshold_help_describes_principal_check() {
    rti()
        .args(["threshold", "--help"])
        .assert()
        .success()
        .stdout(contains("authorization check, not authentication"))
        .stdout(contains("not authenticated"));
}

#[test]
fn test_threshold_update_changes_classification() {
    let db_path = setup_test_db("threshold_update");
    init_db_with_roster(&db_path);

    add_entry(&db_path, "f1", "in", "2025-08-01", "08:45");

    rti()
        .args(["--db", &db_path, "threshold", "--late", "08:30", "--as", "a1", "--print"])
        .assert()
        .success()
        .stdout(contains("Thresholds updated"))
        .stdout(contains("late after : 08:30"))
        .stdout(contains("time window: 06:00-10:00"));

    rti()
        .args(["--db", &db_path, "stats", "--date", "2025-08-01"])
        .assert()
        .success()
        .stdout(contains("present: 0  late: 1"));
}

#[test]
fn test_user_import_and_list() {
    let db_path = setup_test_db("user_import");
    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let roster = temp_out("user_import_roster", "json");
    fs::write(
        &roster,
        r#"[
            {"userId": "f9", "role": "FACULTY", "firstName": "Barbara", "lastName": "Liskov", "email": "bl@school.edu"},
            {"userId": "a9", "role": "ADMIN", "firstName": "Root", "lastName": "Admin", "email": "root@school.edu"}
        ]"#,
    )
    .expect("write roster");

    rti()
        .args(["--db", &db_path, "user", "--import", &roster])
        .assert()
        .success()
        .stdout(contains("Imported 2 users"));

    rti()
        .args(["--db", &db_path, "user", "--list"])
        .assert()
        .success()
        .stdout(contains("Barbara Liskov"))
        .stdout(contains("ADMIN"));
}

#[test]
fn test_user_import_malformed_roster() {
    let db_path = setup_test_db("user_import_bad");
    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let roster = temp_out("user_import_bad_roster", "json");
    fs::write(&roster, "{ not json").expect("write roster");

    rti()
        .args(["--db", &db_path, "user", "--import", &roster])
        .assert()
        .failure()
        .stderr(contains("Failed to fetch roster"));
}

#[test]
fn test_events_sync_corrects_stale_status() {
    let db_path = setup_test_db("events_sync");
    init_db_with_roster(&db_path);

    rti()
        .args([
            "--db",
            &db_path,
            "events",
            "--add",
            "Orientation",
            "--start",
            "2020-01-06 10:00",
            "--duration",
            "1h 30m",
        ])
        .assert()
        .success()
        .stdout(contains("'Orientation' scheduled"));

    rti()
        .args(["--db", &db_path, "events", "--list"])
        .assert()
        .success()
        .stdout(contains("Orientation"))
        .stdout(contains("Upcoming"))
        .stdout(contains("Completed"))
        .stdout(contains("01:30"));

    rti()
        .args(["--db", &db_path, "events", "--sync"])
        .assert()
        .success()
        .stdout(contains("Checked 1 event(s), corrected 1, skipped 0."));

    rti()
        .args(["--db", &db_path, "events", "--sync"])
        .assert()
        .success()
        .stdout(contains("corrected 0"));
}

#[test]
fn test_dashboard_panels() {
    let db_path = setup_test_db("dashboard");
    init_db_with_roster(&db_path);

    add_entry(&db_path, "f2", "in", "2025-08-01", "09:20");

    rti()
        .args(["--db", &db_path, "dashboard", "--date", "2025-08-01"])
        .assert()
        .success()
        .stdout(contains("[Summary]"))
        .stdout(contains("present: 0  late: 1  absent: 1  total: 2"))
        .stdout(contains("[Late faculty]"))
        .stdout(contains("09:20 AM"))
        .stdout(contains("[No time-in]"))
        .stdout(contains("Ada Lovelace"))
        .stdout(contains("Absent"))
        .stdout(contains("[Events]"));
}

/// Drop one table behind the CLI's back so its source fails to load.
fn drop_table(db_path: &str, table: &str) {
    let conn = rusqlite::Connection::open(db_path).expect("open test db");
    conn.execute_batch(&format!("DROP TABLE {table};")).expect("drop table");
}

/// The panel's error line, allowing for the reset code after the label.
fn panel_failed(panel: &str, source: &str) -> RegexPredicate {
    is_match(format!(r"\[{panel}\]\S* Failed to fetch {source}")).expect("valid regex")
}

#[test]
fn test_dashboard_events_failure_stays_in_its_panel() {
    let db_path = setup_test_db("dashboard_no_events");
    init_db_with_roster(&db_path);

    add_entry(&db_path, "f2", "in", "2025-08-01", "09:20");
    drop_table(&db_path, "events");

    rti()
        .args(["--db", &db_path, "dashboard", "--date", "2025-08-01"])
        .assert()
        .success()
        .stdout(contains("[Events]"))
        .stdout(panel_failed("Events", "events"))
        .stdout(contains("present: 0  late: 1  absent: 1  total: 2"))
        .stdout(contains("09:20 AM"));
}

#[test]
fn test_dashboard_thresholds_failure_keeps_events() {
    let db_path = setup_test_db("dashboard_no_settings");
    init_db_with_roster(&db_path);

    add_entry(&db_path, "f2", "in", "2025-08-01", "09:20");
    rti()
        .args([
            "--db",
            &db_path,
            "events",
            "--add",
            "Faculty meeting",
            "--start",
            "2025-08-01 14:00",
            "--duration",
            "1h",
        ])
        .assert()
        .success();
    drop_table(&db_path, "settings");

    rti()
        .args(["--db", &db_path, "dashboard", "--date", "2025-08-01"])
        .assert()
        .success()
        .stdout(panel_failed("Summary", "thresholds"))
        .stdout(panel_failed("Late faculty", "thresholds"))
        .stdout(panel_failed("No time-in", "thresholds"))
        .stdout(contains("- Faculty meeting | 2025-08-01 14:00"))
        .stdout(contains("total: 2").not());
}

#[test]
fn test_watch_prints_counts() {
    let db_path = setup_test_db("watch");
    init_db_with_roster(&db_path);

    add_entry(&db_path, "f1", "in", "2025-08-01", "08:00");

    rti()
        .args([
            "--db",
            &db_path,
            "watch",
            "--date",
            "2025-08-01",
            "--count",
            "1",
            "--interval",
            "50",
        ])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(contains("present: 1  late: 0  absent: 1  total: 2"))
        .stdout(contains("Watch stopped."));
}

#[test]
fn test_log_print() {
    let db_path = setup_test_db("log_print");
    init_db_with_roster(&db_path);

    add_entry(&db_path, "f1", "in", "2025-08-01", "08:00");

    rti()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log"))
        .stdout(contains("init"))
        .stdout(contains("user_add"))
        .stdout(contains("add (f1)"));
}
