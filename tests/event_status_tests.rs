mod common;
use common::ms;
use rattendlog::core::event_status::{EventStore, compute_status, reconcile_events};
use rattendlog::errors::{AppError, AppResult};
use rattendlog::models::scheduled_event::{EventStatus, ScheduledEvent};
use rattendlog::utils::time::parse_duration_minutes;

#[derive(Default)]
struct RecordingStore {
    calls: Vec<(i64, EventStatus)>,
    fail_on: Option<i64>,
}

impl EventStore for RecordingStore {
    fn update_status(&mut self, event_id: i64, status: &EventStatus) -> AppResult<()> {
        self.calls.push((event_id, status.clone()));
        if self.fail_on == Some(event_id) {
            return Err(AppError::fetch("events", "store unreachable"));
        }
        Ok(())
    }
}

fn event(id: i64, start: i64, duration: &str, status: EventStatus) -> ScheduledEvent {
    ScheduledEvent {
        id,
        title: format!("event {id}"),
        start,
        duration: duration.to_string(),
        status,
    }
}

#[test]
fn test_duration_parsing() {
    assert_eq!(parse_duration_minutes("90"), Some(90));
    assert_eq!(parse_duration_minutes("90m"), Some(90));
    assert_eq!(parse_duration_minutes("2h"), Some(120));
    assert_eq!(parse_duration_minutes("1h 30m"), Some(90));
    assert_eq!(parse_duration_minutes("01:30"), Some(90));
    assert_eq!(parse_duration_minutes("1.5h"), Some(90));
    assert_eq!(parse_duration_minutes("2 hours"), Some(120));
    assert_eq!(parse_duration_minutes(""), None);
    assert_eq!(parse_duration_minutes("soon"), None);
    assert_eq!(parse_duration_minutes("1:75"), None);
}

#[test]
fn test_compute_status() {
    let start = ms(2025, 8, 1, 10, 0);
    let ev = event(1, start, "2h", EventStatus::Upcoming);

    assert_eq!(compute_status(&ev, ms(2025, 8, 1, 9, 59)), Some(EventStatus::Upcoming));
    assert_eq!(compute_status(&ev, start), Some(EventStatus::Ongoing));
    assert_eq!(compute_status(&ev, ms(2025, 8, 1, 12, 0)), Some(EventStatus::Ongoing));
    assert_eq!(compute_status(&ev, ms(2025, 8, 1, 12, 1)), Some(EventStatus::Completed));

    let broken = event(2, start, "whenever", EventStatus::Upcoming);
    assert_eq!(compute_status(&broken, start), None);
}

#[test]
fn test_reconcile_corrects_only_mismatches() {
    let now = ms(2025, 8, 1, 11, 0);
    let mut events = vec![
        event(1, ms(2025, 8, 1, 10, 0), "2h", EventStatus::Upcoming),
        event(2, ms(2025, 8, 1, 10, 0), "2h", EventStatus::Ongoing),
        event(3, ms(2025, 7, 1, 10, 0), "1h", EventStatus::Ongoing),
        event(4, ms(2025, 7, 1, 10, 0), "1h", EventStatus::Other("Cancelled".to_string())),
        event(5, ms(2025, 7, 1, 10, 0), "???", EventStatus::Upcoming),
    ];
    let mut store = RecordingStore::default();

    let report = reconcile_events(&mut store, &mut events, now);

    assert_eq!(
        store.calls,
        vec![(1, EventStatus::Ongoing), (3, EventStatus::Completed)]
    );
    assert_eq!(report.checked, 5);
    assert_eq!(report.corrected, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(events[0].status, EventStatus::Ongoing);
    assert_eq!(events[3].status, EventStatus::Other("Cancelled".to_string()));
}

#[test]
fn test_failed_update_is_not_retried_or_surfaced() {
    let now = ms(2025, 8, 1, 11, 0);
    let mut events = vec![
        event(1, ms(2025, 8, 1, 10, 0), "2h", EventStatus::Upcoming),
        event(2, ms(2025, 8, 1, 10, 0), "2h", EventStatus::Upcoming),
    ];
    let mut store = RecordingStore {
        fail_on: Some(1),
        ..Default::default()
    };

    let report = reconcile_events(&mut store, &mut events, now);

    assert_eq!(store.calls.iter().filter(|(id, _)| *id == 1).count(), 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.corrected, 1);
    // the failed event keeps its stored status
    assert_eq!(events[0].status, EventStatus::Upcoming);
    assert_eq!(events[1].status, EventStatus::Ongoing);
}

#[test]
fn test_status_strings_round_trip_through_serde() {
    let json = r#"{"id":7,"title":"Faculty meeting","start":0,"duration":"1h","status":"cancelled"}"#;
    let ev: ScheduledEvent = serde_json::from_str(json).expect("valid event");
    assert_eq!(ev.status, EventStatus::Other("cancelled".to_string()));

    let json = r#"{"id":8,"title":"Seminar","start":0,"duration":"1h","status":"ONGOING"}"#;
    let ev: ScheduledEvent = serde_json::from_str(json).expect("valid event");
    assert_eq!(ev.status, EventStatus::Ongoing);
}
