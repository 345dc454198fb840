use chrono::NaiveDate;
use serde::Serialize;

/// Per-day (or per-range) attendance counts across the roster.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendanceStats {
    pub present: usize,
    pub late: usize,
    pub absent: usize,
}

impl AttendanceStats {
    pub fn total(&self) -> usize {
        self.present + self.late + self.absent
    }

    pub fn merge(&mut self, other: &AttendanceStats) {
        self.present += other.present;
        self.late += other.late;
        self.absent += other.absent;
    }
}

/// Row of the late / no-time-in lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacultyDetail {
    pub user_id: String,
    pub name: String,
    pub email: String,
    /// `None` for members without a time-in.
    pub time_in: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayStats {
    pub date: NaiveDate,
    pub stats: AttendanceStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RangeStats {
    pub days: Vec<DayStats>,
    pub totals: AttendanceStats,
}
