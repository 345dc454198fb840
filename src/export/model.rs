// src/export/model.rs

use crate::core::logic::AttendanceRecord;
use crate::models::stats::AttendanceStats;
use crate::utils::formatting::mins2readable;
use serde::Serialize;

pub const ACTIVE_SESSION: &str = "Active Session";
pub const IN_PROGRESS: &str = "In Progress";

/// Flat row of the attendance report.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AttendanceExport {
    #[serde(rename = "Faculty Name")]
    pub faculty_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time In")]
    pub time_in: String,
    #[serde(rename = "Time Out")]
    pub time_out: String,
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl From<&AttendanceRecord> for AttendanceExport {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            faculty_name: r.name.clone(),
            email: r.email.clone(),
            date: r.date.clone(),
            time_in: r.time_in.clone(),
            time_out: r.time_out.clone().unwrap_or_else(|| ACTIVE_SESSION.to_string()),
            duration: r
                .duration_minutes
                .map(|m| mins2readable(m, false, false))
                .unwrap_or_else(|| IN_PROGRESS.to_string()),
            status: r.status.as_badge().to_string(),
        }
    }
}

/// Summary block printed above the rows.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    pub period: String,
    pub present: usize,
    pub late: usize,
    pub absent: usize,
    pub total: usize,
}

impl ExportSummary {
    pub fn new(period: &str, stats: &AttendanceStats) -> Self {
        Self {
            period: period.to_string(),
            present: stats.present,
            late: stats.late,
            absent: stats.absent,
            total: stats.total(),
        }
    }

    /// (label, value) lines of the summary block.
    pub(crate) fn lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Period", self.period.clone()),
            ("Present", self.present.to_string()),
            ("Late", self.late.to_string()),
            ("Absent", self.absent.to_string()),
            ("Total", self.total.to_string()),
        ]
    }
}

/// Header per CSV / XLSX
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "Faculty Name",
        "Email",
        "Date",
        "Time In",
        "Time Out",
        "Duration",
        "Status",
    ]
}

pub(crate) fn row_to_cells(r: &AttendanceExport) -> Vec<String> {
    vec![
        r.faculty_name.clone(),
        r.email.clone(),
        r.date.clone(),
        r.time_in.clone(),
        r.time_out.clone(),
        r.duration.clone(),
        r.status.clone(),
    ]
}
