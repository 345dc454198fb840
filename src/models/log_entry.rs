use super::entry_type::EntryType;
use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// One raw attendance event as stored in the log store.
///
/// Entries are append-only; the only field the reconciliation core ever
/// writes back is `attendance_badge`, a cache of the classifier output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: EntryType,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub attendance_badge: Option<String>,
}

impl LogEntry {
    pub fn new(id: &str, user_id: &str, kind: EntryType, timestamp: i64) -> Self {
        Self {
            id: id.to_string(),
            user_id: user_id.to_string(),
            kind,
            timestamp,
            image_url: None,
            attendance_badge: None,
        }
    }

    pub fn with_image(mut self, url: &str) -> Self {
        self.image_url = Some(url.to_string());
        self
    }

    pub fn with_badge(mut self, badge: &str) -> Self {
        self.attendance_badge = Some(badge.to_string());
        self
    }

    /// Timestamp as a zoned datetime; `None` when the value is out of range.
    pub fn datetime_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.timestamp_millis_opt(self.timestamp).single()
    }

    /// Calendar day of the entry in the given zone.
    pub fn local_day<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.datetime_in(tz).map(|dt| dt.date_naive())
    }
}
