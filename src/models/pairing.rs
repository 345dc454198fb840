use super::log_entry::LogEntry;
use serde::Serialize;

/// One reconciled TimeIn/TimeOut session of a user.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pairing {
    pub user_id: String,
    pub time_in: LogEntry,
    /// `None` while the session is still open.
    pub time_out: Option<LogEntry>,
    /// 1-based ordinal among the user's pairings for the scope.
    pub entry_number: usize,
}

impl Pairing {
    pub fn is_active(&self) -> bool {
        self.time_out.is_none()
    }

    pub fn duration_ms(&self) -> Option<i64> {
        self.time_out
            .as_ref()
            .map(|out| out.timestamp - self.time_in.timestamp)
    }

    pub fn duration_minutes(&self) -> Option<i64> {
        self.duration_ms().map(|ms| ms / 60_000)
    }
}
