use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryType {
    TimeIn,
    TimeOut,
}

impl EntryType {
    /// Parse user input ("in", "time-in", "TimeIn", ...).
    pub fn et_from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "in" | "timein" => Some(Self::TimeIn),
            "out" | "timeout" => Some(Self::TimeOut),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntryType::TimeIn => "TimeIn",
            EntryType::TimeOut => "TimeOut",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "TimeIn" => Some(EntryType::TimeIn),
            "TimeOut" => Some(EntryType::TimeOut),
            _ => None,
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, EntryType::TimeIn)
    }
}
