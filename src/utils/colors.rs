//! ANSI color helper utilities for terminal output.

use regex::Regex;
use std::sync::LazyLock;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"));

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Impound rate color, using the same tiers as the alerts:
/// above danger → red, above warning → yellow, otherwise green.
pub fn color_for_rate(rate: f64, warning: f64, danger: f64) -> &'static str {
    if rate > danger {
        RED
    } else if rate > warning {
        YELLOW
    } else {
        GREEN
    }
}

/// Grey out the placeholder buckets ("Unknown", "Unassigned", "Unknown Date").
pub fn colorize_bucket(key: &str) -> String {
    match key {
        "Unknown" | "Unassigned" | "Unknown Date" => format!("{GREY}{key}{RESET}"),
        _ => key.to_string(),
    }
}

/// Remove ANSI escape sequences (width calculations).
pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_tiers() {
        assert_eq!(color_for_rate(20.0, 10.0, 15.0), RED);
        assert_eq!(color_for_rate(12.0, 10.0, 15.0), YELLOW);
        assert_eq!(color_for_rate(10.0, 10.0, 15.0), GREEN);
    }

    #[test]
    fn strip_removes_escapes() {
        assert_eq!(strip_ansi(&colorize_bucket("Unknown")), "Unknown");
        assert_eq!(strip_ansi("plain"), "plain");
    }
}
