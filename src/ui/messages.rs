use crate::core::analytics::report::Severity;
use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_DANGER: &str = "🚨";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Icon + color prefix for a report alert.
pub fn alert_prefix(severity: Severity) -> String {
    let (color, icon) = match severity {
        Severity::Danger => (FG_RED, ICON_DANGER),
        Severity::Warning => (FG_YELLOW, ICON_WARN),
        Severity::Info => (FG_BLUE, ICON_INFO),
    };
    format!("{color}{BOLD}{icon} {:<7}{RESET}", severity.as_str().to_uppercase())
}

/// Formatted section header
pub fn header<T: fmt::Display>(msg: T) {
    println!(
        "\n{}{}====================== {}{}",
        FG_BLUE, BOLD, msg, RESET
    );
}
