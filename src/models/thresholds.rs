//! Threshold configuration: late cutoff and allowed time-in window.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LATE_THRESHOLD: &str = "09:00";
pub const DEFAULT_WINDOW_START: &str = "06:00";
pub const DEFAULT_WINDOW_END: &str = "10:00";

/// Wall-clock time with minute precision, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(ClockTime)
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        let t = s.trim();
        let (h, m) = t
            .split_once(':')
            .ok_or_else(|| AppError::InvalidTime(s.to_string()))?;

        if h.len() != 2 || m.len() != 2 {
            return Err(AppError::InvalidTime(s.to_string()));
        }

        let hour: u32 = h.parse().map_err(|_| AppError::InvalidTime(s.to_string()))?;
        let minute: u32 = m.parse().map_err(|_| AppError::InvalidTime(s.to_string()))?;

        ClockTime::new(hour, minute).ok_or_else(|| AppError::InvalidTime(s.to_string()))
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for ClockTime {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClockTime::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ClockTime::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// Clock-time interval during which a TimeIn is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeWindow {
    pub fn new(start: ClockTime, end: ClockTime) -> AppResult<Self> {
        if start > end {
            return Err(AppError::Config(format!(
                "time window start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Inclusive on both ends, minute precision.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let t = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
        t >= self.start.as_naive() && t <= self.end.as_naive()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Settings shared by every classify/aggregate call. Always passed in
/// explicitly; the live copy is kept by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub late_threshold: ClockTime,
    pub time_window: TimeWindow,
}

impl ThresholdConfig {
    pub fn from_strings(late: &str, window_start: &str, window_end: &str) -> AppResult<Self> {
        Ok(Self {
            late_threshold: ClockTime::parse(late)?,
            time_window: TimeWindow::new(
                ClockTime::parse(window_start)?,
                ClockTime::parse(window_end)?,
            )?,
        })
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            late_threshold: ClockTime(NaiveTime::MIN + chrono::Duration::hours(9)),
            time_window: TimeWindow {
                start: ClockTime(NaiveTime::MIN + chrono::Duration::hours(6)),
                end: ClockTime(NaiveTime::MIN + chrono::Duration::hours(10)),
            },
        }
    }
}
