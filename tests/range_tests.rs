mod common;
use chrono::Utc;
use common::{day, ms, time_in, time_out};
use rattendlog::core::pairing::{PairingScope, pair_logs};
use rattendlog::core::range::{DateRange, filter_entries, pair_range, parse_period, validate_range};
use rattendlog::errors::AppError;

#[test]
fn test_invalid_range_is_rejected() {
    let err = validate_range(Some(day(2025, 8, 10)), Some(day(2025, 8, 5))).unwrap_err();
    assert!(matches!(err, AppError::InvalidRange { .. }));
    assert!(err.to_string().contains("2025-08-10"));
}

#[test]
fn test_open_ended_ranges_are_valid() {
    assert!(validate_range(Some(day(2025, 8, 10)), None).is_ok());
    assert!(validate_range(None, Some(day(2025, 8, 5))).is_ok());
    assert!(validate_range(None, None).is_ok());
    assert!(validate_range(Some(day(2025, 8, 5)), Some(day(2025, 8, 5))).is_ok());
}

#[test]
fn test_single_day_range_equals_day_scope() {
    let d = day(2025, 8, 1);
    let entries = vec![
        time_in("e1", "u1", ms(2025, 8, 1, 0, 0)),
        time_out("e2", "u1", ms(2025, 8, 1, 12, 0)),
        time_in("e3", "u1", ms(2025, 8, 1, 23, 59) + 59_999),
        time_in("e4", "u2", ms(2025, 8, 2, 0, 0)),
        time_in("e5", "u2", ms(2025, 7, 31, 23, 59)),
    ];

    let range = validate_range(Some(d), Some(d)).expect("valid range");
    assert_eq!(pair_range(&entries, &range, &Utc), pair_logs(&entries, &PairingScope::Day(d), &Utc));

    // the whole end day is included
    let kept = filter_entries(&entries, &range, &Utc);
    let ids: Vec<&str> = kept.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2", "e3"]);
}

#[test]
fn test_open_range_filters_one_side() {
    let entries = vec![
        time_in("e1", "u1", ms(2025, 7, 1, 8, 0)),
        time_in("e2", "u1", ms(2025, 8, 1, 8, 0)),
        time_in("e3", "u1", ms(2025, 9, 1, 8, 0)),
    ];

    let from_aug = validate_range(Some(day(2025, 8, 1)), None).expect("valid");
    assert_eq!(filter_entries(&entries, &from_aug, &Utc).len(), 2);

    let until_aug = validate_range(None, Some(day(2025, 8, 1))).expect("valid");
    assert_eq!(filter_entries(&entries, &until_aug, &Utc).len(), 2);
}

#[test]
fn test_parse_period() {
    let year = parse_period("2025").expect("year");
    assert_eq!(year.start, Some(day(2025, 1, 1)));
    assert_eq!(year.end, Some(day(2025, 12, 31)));

    let feb = parse_period("2024-02").expect("month");
    assert_eq!(feb.end, Some(day(2024, 2, 29)));

    let single = parse_period("2025-08-01").expect("day");
    assert_eq!(single, DateRange::single(day(2025, 8, 1)));

    let span = parse_period("2025-06:2025-08").expect("span");
    assert_eq!(span.start, Some(day(2025, 6, 1)));
    assert_eq!(span.end, Some(day(2025, 8, 31)));

    let open = parse_period("2025-08-15:").expect("open start");
    assert_eq!(open.end, None);

    assert!(parse_period("all").expect("all").is_unbounded());
}

#[test]
fn test_parse_period_errors() {
    assert!(matches!(parse_period("2025-13"), Err(AppError::InvalidPeriod(_))));
    assert!(matches!(parse_period("yesterday"), Err(AppError::InvalidPeriod(_))));
    assert!(matches!(parse_period(":"), Err(AppError::InvalidPeriod(_))));
    assert!(matches!(
        parse_period("2025-09:2025-08"),
        Err(AppError::InvalidRange { .. })
    ));
}

#[test]
fn test_range_label() {
    assert_eq!(DateRange::default().label(), "all");
    assert_eq!(DateRange::single(day(2025, 8, 1)).label(), "2025-08-01");
    let r = validate_range(Some(day(2025, 8, 1)), Some(day(2025, 8, 5))).expect("valid");
    assert_eq!(r.label(), "2025-08-01 → 2025-08-05");
}
