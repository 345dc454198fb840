//! ANSI color helper utilities for terminal output.
use std::io::IsTerminal;
use std::sync::OnceLock;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Colors only on a terminal, and never with NO_COLOR set.
pub fn enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal())
}

pub fn paint(color: &str, value: &str) -> String {
    if enabled() {
        format!("{color}{value}{RESET}")
    } else {
        value.to_string()
    }
}

fn is_placeholder(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v == "—" || v == "--:--"
}

/// Grey out placeholder values ("", "—", "--:--").
pub fn colorize_optional(value: &str) -> String {
    if is_placeholder(value) {
        paint(GREY, value)
    } else {
        value.to_string()
    }
}

pub fn colorize_in_out(value: &str, is_in: bool) -> String {
    if is_placeholder(value) {
        return paint(GREY, value);
    }

    paint(if is_in { GREEN } else { RED }, value)
}
