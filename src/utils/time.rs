//! Time utilities: parsing HH:MM, duration strings, formatting instants.

use chrono::{NaiveTime, TimeZone};

pub const NO_VALUE: &str = "—";

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Parse a duration string into minutes.
///
/// Accepts "90", "90m", "2h", "1h 30m", "1h30m", "01:30" and "1.5h".
pub fn parse_duration_minutes(s: &str) -> Option<i64> {
    let raw = s.trim().to_lowercase();
    if raw.is_empty() {
        return None;
    }

    if let Some((h, m)) = raw.split_once(':') {
        let h: i64 = h.trim().parse().ok()?;
        let m: i64 = m.trim().parse().ok()?;
        if h < 0 || !(0..60).contains(&m) {
            return None;
        }
        return Some(h * 60 + m);
    }

    if let Ok(m) = raw.parse::<i64>() {
        return (m >= 0).then_some(m);
    }

    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let mut total = 0.0_f64;
    let mut number = String::new();
    let mut seen_unit = false;

    for c in compact.chars() {
        match c {
            '0'..='9' | '.' => number.push(c),
            'h' | 'm' => {
                let value: f64 = number.parse().ok()?;
                total += if c == 'h' { value * 60.0 } else { value };
                number.clear();
                seen_unit = true;
            }
            _ => {
                // tolerate long units: "hours", "mins"
                if !seen_unit || !c.is_ascii_alphabetic() {
                    return None;
                }
            }
        }
    }

    if !number.is_empty() || !seen_unit || total < 0.0 {
        return None;
    }

    Some(total.round() as i64)
}

/// "HH:MM" of an instant, or the placeholder.
pub fn display_time_ms<Tz: TimeZone>(ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(ms)
        .single()
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| NO_VALUE.to_string())
}

/// "hh:mm AM" of an instant, the format used in the detail lists.
pub fn display_time_12h_ms<Tz: TimeZone>(ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(ms)
        .single()
        .map(|t| t.format("%I:%M %p").to_string())
        .unwrap_or_else(|| NO_VALUE.to_string())
}
