//! Assigns an attendance status to a pairing.

use crate::models::pairing::Pairing;
use crate::models::status::AttendanceStatus;
use crate::models::thresholds::ClockTime;
use crate::utils::date::{day_end_ms, naive_to_ms};
use chrono::{NaiveDate, TimeZone};

/// Instant of `late_threshold` (seconds = 00) on `reference_date`.
pub fn threshold_instant<Tz: TimeZone>(late_threshold: ClockTime, reference_date: NaiveDate, tz: &Tz) -> i64 {
    naive_to_ms(reference_date.and_time(late_threshold.as_naive()), tz)
}

/// Status of a pairing against the late threshold of `reference_date`.
///
/// No pairing means no time-in. A time-in exactly at the threshold is
/// on time.
pub fn classify<Tz: TimeZone>(
    pairing: Option<&Pairing>,
    late_threshold: ClockTime,
    reference_date: NaiveDate,
    tz: &Tz,
) -> AttendanceStatus {
    match pairing {
        Some(p) => classify_time_in(p.time_in.timestamp, late_threshold, reference_date, tz),
        None => AttendanceStatus::NoTimeIn,
    }
}

/// On Time / Late for a bare time-in instant.
pub fn classify_time_in<Tz: TimeZone>(
    timestamp: i64,
    late_threshold: ClockTime,
    reference_date: NaiveDate,
    tz: &Tz,
) -> AttendanceStatus {
    if timestamp <= threshold_instant(late_threshold, reference_date, tz) {
        AttendanceStatus::OnTime
    } else {
        AttendanceStatus::Late
    }
}

/// Classify against the day of the pairing's own time-in.
pub fn classify_own_day<Tz: TimeZone>(pairing: &Pairing, late_threshold: ClockTime, tz: &Tz) -> AttendanceStatus {
    match pairing.time_in.local_day(tz) {
        Some(day) => classify(Some(pairing), late_threshold, day, tz),
        // unrepresentable timestamp: keep it counted, as late
        None => AttendanceStatus::Late,
    }
}

/// Like [`classify`], but a missing pairing turns into `Absent` once
/// `reference_date` has fully elapsed at `now_ms`. Before that the
/// member may still time in, so the status stays `NoTimeIn`.
pub fn resolve_day_status<Tz: TimeZone>(
    pairing: Option<&Pairing>,
    late_threshold: ClockTime,
    reference_date: NaiveDate,
    now_ms: i64,
    tz: &Tz,
) -> AttendanceStatus {
    match pairing {
        Some(_) => classify(pairing, late_threshold, reference_date, tz),
        None if now_ms > day_end_ms(reference_date, tz) => AttendanceStatus::Absent,
        None => AttendanceStatus::NoTimeIn,
    }
}

/// Status cached on the pairing's time-in, if it parses.
pub fn cached_status(pairing: &Pairing) -> Option<AttendanceStatus> {
    pairing
        .time_in
        .attendance_badge
        .as_deref()
        .and_then(AttendanceStatus::from_badge)
}

/// A time-in badged "Absent" is a terminal mark; it is never reclassified.
pub fn is_badged_absent(pairing: &Pairing) -> bool {
    cached_status(pairing) == Some(AttendanceStatus::Absent)
}

/// Badge to write back on the pairing's time-in, or `None` when the
/// cached badge already matches or is a terminal "Absent".
pub fn stale_badge(pairing: &Pairing, status: AttendanceStatus) -> Option<&'static str> {
    let cached = cached_status(pairing);
    if cached == Some(AttendanceStatus::Absent) {
        return None;
    }

    (cached != Some(status)).then(|| status.as_badge())
}
