//! Inclusive day ranges: validation, period parsing and re-scoping of
//! the raw log stream before pairing.

use crate::core::pairing::{PairingScope, PairingsByUser, pair_logs};
use crate::errors::{AppError, AppResult};
use crate::models::log_entry::LogEntry;
use crate::utils::date::month_last_day;
use chrono::{NaiveDate, TimeZone};

/// A validated day range. A missing bound is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: Some(day),
            end: Some(day),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn label(&self) -> String {
        let fmt = |d: Option<NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "…".to_string())
        };
        match (self.start, self.end) {
            (None, None) => "all".to_string(),
            (Some(s), Some(e)) if s == e => fmt(Some(s)),
            _ => format!("{} → {}", fmt(self.start), fmt(self.end)),
        }
    }
}

/// Check that `start` is not after `end`.
pub fn validate_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> AppResult<DateRange> {
    if let (Some(s), Some(e)) = (start, end)
        && s > e
    {
        return Err(AppError::InvalidRange {
            start: s.to_string(),
            end: e.to_string(),
        });
    }

    Ok(DateRange { start, end })
}

/// Entries inside the range; the end day is included up to 23:59:59.999.
pub fn filter_entries<Tz: TimeZone>(entries: &[LogEntry], range: &DateRange, tz: &Tz) -> Vec<LogEntry> {
    let scope = PairingScope::Range(*range);
    entries
        .iter()
        .filter(|e| scope.contains(e.timestamp, tz))
        .cloned()
        .collect()
}

/// Pair the entries of a validated range.
pub fn pair_range<Tz: TimeZone>(entries: &[LogEntry], range: &DateRange, tz: &Tz) -> PairingsByUser {
    pair_logs(entries, &PairingScope::Range(*range), tz)
}

/// Parse a period expression into a range.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any two of the above joined by `:` (`2025-06:2025-08`)
/// - open ranges `START:` and `:END`
/// - `all` (unbounded)
pub fn parse_period(p: &str) -> AppResult<DateRange> {
    let p = p.trim();

    if p.eq_ignore_ascii_case("all") {
        return Ok(DateRange::default());
    }

    if let Some((start_raw, end_raw)) = p.split_once(':') {
        let start = match start_raw.trim() {
            "" => None,
            s => Some(period_bounds(s)?.0),
        };
        let end = match end_raw.trim() {
            "" => None,
            e => Some(period_bounds(e)?.1),
        };

        if start.is_none() && end.is_none() {
            return Err(AppError::InvalidPeriod(p.to_string()));
        }

        return validate_range(start, end);
    }

    let (s, e) = period_bounds(p)?;
    validate_range(Some(s), Some(e))
}

/// First and last day of a single YYYY / YYYY-MM / YYYY-MM-DD period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidPeriod(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let (ys, ms) = p.split_once('-').ok_or_else(invalid)?;
            let y: i32 = ys.parse().map_err(|_| invalid())?;
            let m: u32 = ms.parse().map_err(|_| invalid())?;
            let last = month_last_day(y, m).ok_or_else(invalid)?;

            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}
