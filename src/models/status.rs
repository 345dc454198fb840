use serde::Serialize;
use std::fmt;

/// Derived attendance classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttendanceStatus {
    OnTime,
    Late,
    Absent,
    NoTimeIn,
}

impl AttendanceStatus {
    /// Badge string cached on the TimeIn entry.
    pub fn as_badge(&self) -> &'static str {
        match self {
            AttendanceStatus::OnTime => "On Time",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::NoTimeIn => "No Time-in",
        }
    }

    /// Parse a cached badge. Tolerates case and separator differences
    /// between the clients that wrote it.
    pub fn from_badge(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "ontime" | "present" => Some(AttendanceStatus::OnTime),
            "late" => Some(AttendanceStatus::Late),
            "absent" => Some(AttendanceStatus::Absent),
            "notimein" => Some(AttendanceStatus::NoTimeIn),
            _ => None,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_badge())
    }
}
