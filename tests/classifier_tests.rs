mod common;
use chrono::{FixedOffset, Utc};
use common::{day, ms, time_in, time_out};
use rattendlog::core::classifier::{
    classify, classify_own_day, classify_time_in, resolve_day_status, stale_badge, threshold_instant,
};
use rattendlog::core::pairing::{PairingScope, pair_logs};
use rattendlog::models::pairing::Pairing;
use rattendlog::models::status::AttendanceStatus;
use rattendlog::models::thresholds::{ClockTime, ThresholdConfig, TimeWindow};

fn nine() -> ClockTime {
    ClockTime::parse("09:00").expect("valid clock time")
}

fn pairing_at(ts: i64) -> Pairing {
    Pairing {
        user_id: "u1".to_string(),
        time_in: time_in("e1", "u1", ts),
        time_out: None,
        entry_number: 1,
    }
}

#[test]
fn test_on_time_and_late() {
    let d = day(2025, 8, 1);

    let early = pairing_at(ms(2025, 8, 1, 8, 0));
    let late = pairing_at(ms(2025, 8, 1, 9, 15));

    assert_eq!(classify(Some(&early), nine(), d, &Utc), AttendanceStatus::OnTime);
    assert_eq!(classify(Some(&late), nine(), d, &Utc), AttendanceStatus::Late);
}

#[test]
fn test_exactly_at_threshold_is_on_time() {
    let d = day(2025, 8, 1);
    let at = pairing_at(ms(2025, 8, 1, 9, 0));
    let one_ms_after = pairing_at(ms(2025, 8, 1, 9, 0) + 1);

    assert_eq!(classify(Some(&at), nine(), d, &Utc), AttendanceStatus::OnTime);
    assert_eq!(classify(Some(&one_ms_after), nine(), d, &Utc), AttendanceStatus::Late);
}

#[test]
fn test_no_pairing_is_no_time_in() {
    assert_eq!(classify(None, nine(), day(2025, 8, 1), &Utc), AttendanceStatus::NoTimeIn);
}

#[test]
fn test_classify_is_idempotent() {
    let d = day(2025, 8, 1);
    let p = pairing_at(ms(2025, 8, 1, 9, 1));

    let first = classify(Some(&p), nine(), d, &Utc);
    let second = classify(Some(&p), nine(), d, &Utc);
    assert_eq!(first, second);

    // a cached badge does not change the outcome
    let mut badged = p.clone();
    badged.time_in = badged.time_in.with_badge(first.as_badge());
    assert_eq!(classify(Some(&badged), nine(), d, &Utc), first);
}

#[test]
fn test_double_time_in_classified_on_later_entry() {
    let entries = vec![
        time_in("e1", "u1", ms(2025, 8, 1, 8, 0)),
        time_in("e2", "u1", ms(2025, 8, 1, 8, 30)),
        time_out("e3", "u1", ms(2025, 8, 1, 17, 0)),
    ];
    let d = day(2025, 8, 1);
    let out = pair_logs(&entries, &PairingScope::Day(d), &Utc);

    let p = &out["u1"][0];
    assert_eq!(p.time_in.timestamp, ms(2025, 8, 1, 8, 30));
    assert_eq!(classify(Some(p), nine(), d, &Utc), AttendanceStatus::OnTime);
}

#[test]
fn test_threshold_instant_follows_the_zone() {
    let manila = FixedOffset::east_opt(8 * 3600).expect("valid offset");
    let d = day(2025, 8, 1);

    // 09:00 at +08:00 is 01:00 UTC
    assert_eq!(threshold_instant(nine(), d, &manila), ms(2025, 8, 1, 1, 0));
    assert_eq!(
        classify_time_in(ms(2025, 8, 1, 0, 59), nine(), d, &manila),
        AttendanceStatus::OnTime
    );
    assert_eq!(
        classify_time_in(ms(2025, 8, 1, 1, 1), nine(), d, &manila),
        AttendanceStatus::Late
    );
}

#[test]
fn test_classify_own_day_uses_the_time_in_day() {
    let p = pairing_at(ms(2025, 8, 3, 9, 30));
    assert_eq!(classify_own_day(&p, nine(), &Utc), AttendanceStatus::Late);

    let p = pairing_at(ms(2025, 8, 4, 7, 45));
    assert_eq!(classify_own_day(&p, nine(), &Utc), AttendanceStatus::OnTime);
}

#[test]
fn test_missing_time_in_becomes_absent_after_the_day() {
    let d = day(2025, 8, 1);

    let during = ms(2025, 8, 1, 11, 0);
    let after = ms(2025, 8, 2, 0, 0);

    assert_eq!(resolve_day_status(None, nine(), d, during, &Utc), AttendanceStatus::NoTimeIn);
    assert_eq!(resolve_day_status(None, nine(), d, after, &Utc), AttendanceStatus::Absent);

    let p = pairing_at(ms(2025, 8, 1, 8, 0));
    assert_eq!(resolve_day_status(Some(&p), nine(), d, after, &Utc), AttendanceStatus::OnTime);
}

#[test]
fn test_stale_badge() {
    let p = pairing_at(ms(2025, 8, 1, 8, 0));
    assert_eq!(stale_badge(&p, AttendanceStatus::OnTime), Some("On Time"));

    let mut cached = p.clone();
    cached.time_in = cached.time_in.with_badge("on time");
    assert_eq!(stale_badge(&cached, AttendanceStatus::OnTime), None);
    assert_eq!(stale_badge(&cached, AttendanceStatus::Late), Some("Late"));
}

#[test]
fn test_absent_badge_is_never_overwritten() {
    let mut p = pairing_at(ms(2025, 8, 1, 8, 0));
    p.time_in = p.time_in.with_badge("Absent");

    assert_eq!(stale_badge(&p, AttendanceStatus::OnTime), None);
    assert_eq!(stale_badge(&p, AttendanceStatus::Late), None);
}

#[test]
fn test_clock_time_parsing() {
    assert!(ClockTime::parse("9:00").is_err());
    assert!(ClockTime::parse("25:00").is_err());
    assert!(ClockTime::parse("nine").is_err());
    assert_eq!(ClockTime::parse("09:05").map(|c| c.to_string()).ok(), Some("09:05".to_string()));
}

#[test]
fn test_time_window() {
    let cfg = ThresholdConfig::default();
    assert_eq!(cfg.late_threshold.to_string(), "09:00");
    assert_eq!(cfg.time_window.to_string(), "06:00-10:00");

    let w = cfg.time_window;
    let t = |s: &str| chrono::NaiveTime::parse_from_str(s, "%H:%M:%S").expect("valid time");
    assert!(w.contains(t("06:00:00")));
    assert!(w.contains(t("10:00:59")));
    assert!(!w.contains(t("05:59:59")));
    assert!(!w.contains(t("10:01:00")));

    let start = ClockTime::parse("10:00").expect("valid");
    let end = ClockTime::parse("06:00").expect("valid");
    assert!(TimeWindow::new(start, end).is_err());
}
