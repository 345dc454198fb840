//! Turns a flat per-user stream of TimeIn/TimeOut entries into pairings.

use crate::core::range::DateRange;
use crate::models::entry_type::EntryType;
use crate::models::log_entry::LogEntry;
use crate::models::pairing::Pairing;
use crate::utils::date::{day_end_ms, day_start_ms};
use chrono::{NaiveDate, TimeZone};
use std::collections::BTreeMap;

/// Which part of the log stream to pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingScope {
    /// Entries whose calendar day equals the target day.
    Day(NaiveDate),
    /// Entries inside an inclusive, possibly open-ended day range.
    Range(DateRange),
}

impl PairingScope {
    /// Millisecond bounds of the scope, both inclusive.
    pub fn bounds_ms<Tz: TimeZone>(&self, tz: &Tz) -> (i64, i64) {
        match self {
            PairingScope::Day(d) => (day_start_ms(*d, tz), day_end_ms(*d, tz)),
            PairingScope::Range(r) => (
                r.start.map(|d| day_start_ms(d, tz)).unwrap_or(i64::MIN),
                r.end.map(|d| day_end_ms(d, tz)).unwrap_or(i64::MAX),
            ),
        }
    }

    pub fn contains<Tz: TimeZone>(&self, ms: i64, tz: &Tz) -> bool {
        let (lo, hi) = self.bounds_ms(tz);
        ms >= lo && ms <= hi
    }
}

/// Pairings grouped by user id.
pub type PairingsByUser = BTreeMap<String, Vec<Pairing>>;

/// Pair the entries that fall in `scope`, grouped by user.
///
/// Within a user the entries are walked in timestamp order keeping one
/// open TimeIn slot:
/// - a TimeIn replaces the slot, discarding an earlier unmatched TimeIn;
/// - a TimeOut closes the slot when the slot's TimeIn is strictly
///   earlier, otherwise it is dropped as orphaned;
/// - a TimeIn still open at the end yields an active pairing.
pub fn pair_logs<Tz: TimeZone>(entries: &[LogEntry], scope: &PairingScope, tz: &Tz) -> PairingsByUser {
    let (lo, hi) = scope.bounds_ms(tz);

    let mut grouped: BTreeMap<&str, Vec<&LogEntry>> = BTreeMap::new();
    for e in entries.iter().filter(|e| e.timestamp >= lo && e.timestamp <= hi) {
        grouped.entry(e.user_id.as_str()).or_default().push(e);
    }

    let mut out = PairingsByUser::new();

    for (user_id, mut list) in grouped {
        // ties break on the push id so any permutation pairs the same way
        list.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));

        let pairings = pair_sorted(user_id, &list);
        if !pairings.is_empty() {
            out.insert(user_id.to_string(), pairings);
        }
    }

    out
}

/// Single-user walk over entries already sorted by timestamp.
fn pair_sorted(user_id: &str, sorted: &[&LogEntry]) -> Vec<Pairing> {
    let mut pairings: Vec<Pairing> = Vec::new();
    let mut open: Option<&LogEntry> = None;

    for entry in sorted {
        match entry.kind {
            EntryType::TimeIn => {
                if let Some(prev) = open {
                    tracing::debug!(
                        user = user_id,
                        discarded = %prev.id,
                        "unmatched time-in replaced by a later time-in"
                    );
                }
                open = Some(entry);
            }
            EntryType::TimeOut => match open {
                Some(time_in) if time_in.timestamp < entry.timestamp => {
                    pairings.push(Pairing {
                        user_id: user_id.to_string(),
                        time_in: time_in.clone(),
                        time_out: Some((*entry).clone()),
                        entry_number: pairings.len() + 1,
                    });
                    open = None;
                }
                _ => {
                    // TODO: decide on recovery for time-outs whose time-in was lost upstream
                    tracing::debug!(user = user_id, entry = %entry.id, "orphaned time-out dropped");
                }
            },
        }
    }

    if let Some(time_in) = open {
        pairings.push(Pairing {
            user_id: user_id.to_string(),
            time_in: time_in.clone(),
            time_out: None,
            entry_number: pairings.len() + 1,
        });
    }

    pairings
}

/// Latest pairing of a user, if any.
pub fn latest(pairings: &[Pairing]) -> Option<&Pairing> {
    pairings.last()
}
