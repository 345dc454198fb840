//! Detects scheduled events whose stored status disagrees with the
//! clock and pushes best-effort corrections to the event store.

use crate::errors::AppResult;
use crate::models::scheduled_event::{EventStatus, ScheduledEvent};

/// Write side of the event store used by the correction side-channel.
pub trait EventStore {
    fn update_status(&mut self, event_id: i64, status: &EventStatus) -> AppResult<()>;
}

/// Status implied by `now_ms` against `[start, start + duration]`.
/// `None` when the stored duration is unparsable.
pub fn compute_status(event: &ScheduledEvent, now_ms: i64) -> Option<EventStatus> {
    let end = event.end()?;

    Some(if now_ms < event.start {
        EventStatus::Upcoming
    } else if now_ms <= end {
        EventStatus::Ongoing
    } else {
        EventStatus::Completed
    })
}

/// Outcome of a correction pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CorrectionReport {
    pub checked: usize,
    pub corrected: usize,
    pub failed: usize,
    /// Events skipped because their duration could not be parsed.
    pub skipped: usize,
}

/// Issue one status update per mismatching event.
///
/// Updates are fire-and-forget: a failure is logged and the pass moves
/// on. Nothing is retried and no error reaches the caller. Events with a
/// status written by another client (`Other`) are left alone.
pub fn reconcile_events<S: EventStore>(store: &mut S, events: &mut [ScheduledEvent], now_ms: i64) -> CorrectionReport {
    let mut report = CorrectionReport::default();

    for event in events.iter_mut() {
        report.checked += 1;

        if matches!(event.status, EventStatus::Other(_)) {
            continue;
        }

        let Some(expected) = compute_status(event, now_ms) else {
            tracing::debug!(event = event.id, duration = %event.duration, "unparsable duration, status not checked");
            report.skipped += 1;
            continue;
        };

        if expected == event.status {
            continue;
        }

        match store.update_status(event.id, &expected) {
            Ok(()) => {
                tracing::info!(
                    event = event.id,
                    from = event.status.as_str(),
                    to = expected.as_str(),
                    "event status corrected"
                );
                event.status = expected;
                report.corrected += 1;
            }
            Err(e) => {
                tracing::warn!(event = event.id, error = %e, "event status update failed");
                report.failed += 1;
            }
        }
    }

    report
}
