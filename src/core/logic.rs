use crate::core::classifier::{classify_own_day, is_badged_absent, stale_badge};
use crate::core::pairing::{PairingScope, PairingsByUser, pair_logs};
use crate::core::range::{DateRange, pair_range};
use crate::core::stats::{aggregate, aggregate_range, late_faculty_details, no_time_in_details};
use crate::models::log_entry::LogEntry;
use crate::models::stats::{AttendanceStats, FacultyDetail, RangeStats};
use crate::models::status::AttendanceStatus;
use crate::models::thresholds::ThresholdConfig;
use crate::models::user::Roster;
use crate::utils::date::display_date_ms;
use crate::utils::time::display_time_ms;
use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

/// One materialized pairing, ready for listing or export.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub date: String,
    pub time_in: String,
    /// `None` for an active session.
    pub time_out: Option<String>,
    /// `None` while the session is in progress.
    pub duration_minutes: Option<i64>,
    pub status: AttendanceStatus,
    pub entry_number: usize,
    #[serde(skip)]
    pub time_in_entry_id: String,
    /// Badge to cache on the time-in entry when the stored one is stale.
    #[serde(skip)]
    pub pending_badge: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub pairings: PairingsByUser,
    pub stats: AttendanceStats,
    pub late: Vec<FacultyDetail>,
    pub no_time_in: Vec<FacultyDetail>,
    pub records: Vec<AttendanceRecord>,
}

#[derive(Debug, Clone)]
pub struct RangeReport {
    pub range: DateRange,
    pub stats: RangeStats,
    pub records: Vec<AttendanceRecord>,
}

pub struct Core;

impl Core {
    /// Everything the dashboard shows for one day.
    pub fn daily_report<Tz: TimeZone>(
        entries: &[LogEntry],
        roster: &Roster,
        thresholds: &ThresholdConfig,
        date: NaiveDate,
        tz: &Tz,
    ) -> DailyReport
    where
        Tz::Offset: std::fmt::Display,
    {
        let late_threshold = thresholds.late_threshold;
        let pairings = pair_logs(entries, &PairingScope::Day(date), tz);

        DailyReport {
            date,
            stats: aggregate(roster, &pairings, late_threshold, date, tz),
            late: late_faculty_details(roster, &pairings, late_threshold, date, tz),
            no_time_in: no_time_in_details(roster, &pairings),
            records: Self::records(&pairings, roster, thresholds, tz),
            pairings,
        }
    }

    /// Range-filtered re-aggregation.
    pub fn range_report<Tz: TimeZone>(
        entries: &[LogEntry],
        roster: &Roster,
        thresholds: &ThresholdConfig,
        range: &DateRange,
        tz: &Tz,
    ) -> RangeReport
    where
        Tz::Offset: std::fmt::Display,
    {
        let pairings = pair_range(entries, range, tz);

        RangeReport {
            range: *range,
            stats: aggregate_range(roster, entries, range, thresholds.late_threshold, tz),
            records: Self::records(&pairings, roster, thresholds, tz),
        }
    }

    /// One record per pairing of a roster member, ordered by date, name
    /// and entry number. Each pairing is classified against its own day.
    pub fn records<Tz: TimeZone>(
        pairings: &PairingsByUser,
        roster: &Roster,
        thresholds: &ThresholdConfig,
        tz: &Tz,
    ) -> Vec<AttendanceRecord>
    where
        Tz::Offset: std::fmt::Display,
    {
        let mut out: Vec<AttendanceRecord> = Vec::new();

        for (user_id, list) in pairings {
            let Some(user) = roster.get(user_id) else {
                continue;
            };

            for p in list {
                let status = if is_badged_absent(p) {
                    AttendanceStatus::Absent
                } else {
                    classify_own_day(p, thresholds.late_threshold, tz)
                };
                out.push(AttendanceRecord {
                    user_id: user_id.clone(),
                    name: user.full_name(),
                    email: user.email.clone(),
                    date: display_date_ms(p.time_in.timestamp, tz),
                    time_in: display_time_ms(p.time_in.timestamp, tz),
                    time_out: p.time_out.as_ref().map(|o| display_time_ms(o.timestamp, tz)),
                    duration_minutes: p.duration_minutes(),
                    status,
                    entry_number: p.entry_number,
                    time_in_entry_id: p.time_in.id.clone(),
                    pending_badge: stale_badge(p, status),
                });
            }
        }

        out.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.entry_number.cmp(&b.entry_number))
        });
        out
    }

    /// Badge cache writes needed for `records` (entry id, badge).
    pub fn pending_badges(records: &[AttendanceRecord]) -> Vec<(String, &'static str)> {
        records
            .iter()
            .filter_map(|r| r.pending_badge.map(|b| (r.time_in_entry_id.clone(), b)))
            .collect()
    }
}
