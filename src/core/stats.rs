//! Roster-wide attendance counts and detail lists.

use crate::core::classifier::{classify, is_badged_absent};
use crate::core::pairing::{PairingScope, PairingsByUser, latest, pair_logs};
use crate::core::range::DateRange;
use crate::models::log_entry::LogEntry;
use crate::models::stats::{AttendanceStats, DayStats, FacultyDetail, RangeStats};
use crate::models::status::AttendanceStatus;
use crate::models::thresholds::ClockTime;
use crate::models::user::Roster;
use crate::utils::date::days_between;
use crate::utils::time::display_time_12h_ms;
use chrono::{NaiveDate, TimeZone};
use std::collections::BTreeMap;

/// Daily tally for `reference_date`.
///
/// Only the latest pairing of each roster member counts. A time-in
/// already badged "Absent" counts as absent. Members with no pairing are
/// absent. Pairings of users outside the roster are ignored, so the
/// three buckets always add up to the roster size.
pub fn aggregate<Tz: TimeZone>(
    roster: &Roster,
    pairings_by_user: &PairingsByUser,
    late_threshold: ClockTime,
    reference_date: NaiveDate,
    tz: &Tz,
) -> AttendanceStats {
    let mut stats = AttendanceStats::default();
    let mut counted = 0usize;

    for user in roster.users() {
        let Some(pairing) = pairings_by_user.get(&user.user_id).and_then(|p| latest(p)) else {
            continue;
        };
        counted += 1;

        if is_badged_absent(pairing) {
            stats.absent += 1;
            continue;
        }

        match classify(Some(pairing), late_threshold, reference_date, tz) {
            AttendanceStatus::OnTime => stats.present += 1,
            AttendanceStatus::Late => stats.late += 1,
            AttendanceStatus::Absent | AttendanceStatus::NoTimeIn => stats.absent += 1,
        }
    }

    let ignored = pairings_by_user
        .keys()
        .filter(|id| !roster.contains(id))
        .count();
    if ignored > 0 {
        tracing::debug!(ignored, "pairings of users outside the roster ignored");
    }

    stats.absent += roster.len() - counted;
    stats
}

/// Roster members whose latest pairing on `reference_date` is late.
pub fn late_faculty_details<Tz: TimeZone>(
    roster: &Roster,
    pairings_by_user: &PairingsByUser,
    late_threshold: ClockTime,
    reference_date: NaiveDate,
    tz: &Tz,
) -> Vec<FacultyDetail>
where
    Tz::Offset: std::fmt::Display,
{
    roster
        .users()
        .iter()
        .filter_map(|user| {
            let pairing = pairings_by_user.get(&user.user_id).and_then(|p| latest(p))?;
            if is_badged_absent(pairing)
                || classify(Some(pairing), late_threshold, reference_date, tz) != AttendanceStatus::Late
            {
                return None;
            }

            Some(FacultyDetail {
                user_id: user.user_id.clone(),
                name: user.full_name(),
                email: user.email.clone(),
                time_in: Some(display_time_12h_ms(pairing.time_in.timestamp, tz)),
                image_url: pairing
                    .time_in
                    .image_url
                    .clone()
                    .or_else(|| user.profile_picture_url.clone()),
            })
        })
        .collect()
}

/// Roster members without any pairing (a lone time-out gives no credit).
pub fn no_time_in_details(roster: &Roster, pairings_by_user: &PairingsByUser) -> Vec<FacultyDetail> {
    roster
        .users()
        .iter()
        .filter(|user| !pairings_by_user.contains_key(&user.user_id))
        .map(|user| FacultyDetail {
            user_id: user.user_id.clone(),
            name: user.full_name(),
            email: user.email.clone(),
            time_in: None,
            image_url: user.profile_picture_url.clone(),
        })
        .collect()
}

/// Per-day tallies over a range, plus totals.
///
/// Open bounds are closed with the earliest / latest day that has
/// entries; an unbounded range over an empty log yields no days.
pub fn aggregate_range<Tz: TimeZone>(
    roster: &Roster,
    entries: &[LogEntry],
    range: &DateRange,
    late_threshold: ClockTime,
    tz: &Tz,
) -> RangeStats {
    // entries bucketed by local day
    let mut by_day: BTreeMap<NaiveDate, Vec<LogEntry>> = BTreeMap::new();
    for e in entries {
        if let Some(d) = e.local_day(tz) {
            by_day.entry(d).or_default().push(e.clone());
        }
    }

    let start = range.start.or_else(|| by_day.keys().next().copied());
    let end = range.end.or_else(|| by_day.keys().next_back().copied());

    let (Some(start), Some(end)) = (start, end) else {
        return RangeStats::default();
    };

    let mut out = RangeStats::default();

    for day in days_between(start, end) {
        let bucket = by_day.get(&day).map(Vec::as_slice).unwrap_or_default();
        let pairings = pair_logs(bucket, &PairingScope::Day(day), tz);
        let stats = aggregate(roster, &pairings, late_threshold, day, tz);
        out.totals.merge(&stats);
        out.days.push(DayStats { date: day, stats });
    }

    out
}
