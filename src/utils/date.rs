//! Calendar-day helpers. A "day" is always a calendar day in the zone
//! the caller passes in (the deployment's local zone for the CLI).

use chrono::{Duration, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone};

pub const UNKNOWN_DATE: &str = "Unknown Date";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Resolve a naive local datetime to epoch milliseconds.
/// Ambiguous instants (DST fold) take the earliest; instants inside a
/// DST gap are moved forward by one hour.
pub fn naive_to_ms<Tz: TimeZone>(dt: NaiveDateTime, tz: &Tz) -> i64 {
    match tz.from_local_datetime(&dt) {
        LocalResult::Single(t) => t.timestamp_millis(),
        LocalResult::Ambiguous(a, _) => a.timestamp_millis(),
        LocalResult::None => tz
            .from_local_datetime(&(dt + Duration::hours(1)))
            .earliest()
            .map(|t| t.timestamp_millis())
            .unwrap_or_else(|| dt.and_utc().timestamp_millis()),
    }
}

/// First millisecond of `day`.
pub fn day_start_ms<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> i64 {
    naive_to_ms(day.and_time(chrono::NaiveTime::MIN), tz)
}

/// Last millisecond of `day` (23:59:59.999).
pub fn day_end_ms<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> i64 {
    match day.succ_opt() {
        Some(next) => day_start_ms(next, tz) - 1,
        None => i64::MAX,
    }
}

/// Calendar day of an epoch-millisecond instant.
pub fn day_of_ms<Tz: TimeZone>(ms: i64, tz: &Tz) -> Option<NaiveDate> {
    tz.timestamp_millis_opt(ms).single().map(|t| t.date_naive())
}

/// All days from `start` to `end`, inclusive.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = start;

    while d <= end {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    out
}

/// "YYYY-MM-DD" of an instant, or the placeholder when it cannot be represented.
pub fn display_date_ms<Tz: TimeZone>(ms: i64, tz: &Tz) -> String {
    day_of_ms(ms, tz)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

pub fn month_last_day(y: i32, m: u32) -> Option<u32> {
    match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (y % 4 == 0 && y % 100 != 0) || (y % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}
