use crate::utils::time::parse_duration_minutes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    /// Status strings written by other clients (e.g. "Cancelled").
    Other(String),
}

impl EventStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Ongoing => "Ongoing",
            EventStatus::Completed => "Completed",
            EventStatus::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for EventStatus {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "upcoming" => EventStatus::Upcoming,
            "ongoing" => EventStatus::Ongoing,
            "completed" => EventStatus::Completed,
            _ => EventStatus::Other(value),
        }
    }
}

impl From<EventStatus> for String {
    fn from(value: EventStatus) -> Self {
        value.as_str().to_string()
    }
}

/// An event on the scheduling side, as kept by the event store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub id: i64,
    pub title: String,
    /// Start instant, milliseconds since epoch.
    pub start: i64,
    /// Raw duration string ("2h", "90m", "1h 30m", "01:30").
    pub duration: String,
    pub status: EventStatus,
}

impl ScheduledEvent {
    /// End instant; `None` when the stored duration cannot be parsed.
    pub fn end(&self) -> Option<i64> {
        parse_duration_minutes(&self.duration).map(|m| self.start + m * 60_000)
    }
}
