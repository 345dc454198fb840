//! Formatting utilities used for CLI and export outputs.

use crate::models::status::AttendanceStatus;
use crate::utils::colors::{GREEN, GREY, RED, YELLOW, paint};

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Status label with its terminal color.
pub fn describe_status(status: AttendanceStatus) -> String {
    let color = match status {
        AttendanceStatus::OnTime => GREEN,
        AttendanceStatus::Late => YELLOW,
        AttendanceStatus::Absent => RED,
        AttendanceStatus::NoTimeIn => GREY,
    };
    paint(color, status.as_badge())
}
