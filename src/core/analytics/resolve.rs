//! Per-record field resolution: who, when and which shift.

use crate::models::{record::TransactionRecord, shift::Shift};
use crate::utils::date::{day_key, parse_cell_timestamp, parse_timestamp};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

pub const UNKNOWN_PERSON: &str = "Unknown";
pub const UNASSIGNED: &str = "Unassigned";
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Raw columns tried, in order, when the canonical person is unusable.
pub const PERSON_COLUMNS: [&str; 5] =
    ["User Full Name", "Driver Name", "Name", "Driver", "Owner Name"];

/// Raw columns tried, in order, when the canonical date is missing.
pub const DATE_COLUMNS: [&str; 4] = ["date", "Date", "datetime", "Datetime"];

const PLACEHOLDER_NAMES: [&str; 5] = ["n/a", "na", "none", "unknown", "-"];

static NA_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^n\.?a\.?$").expect("static placeholder pattern"));

/// True when a name carries no identity ("", "N/A", "none", "n.a.", ...).
pub fn is_placeholder(name: &str) -> bool {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return true;
    }

    let lower = trimmed.to_lowercase();
    PLACEHOLDER_NAMES.contains(&lower.as_str()) || NA_PATTERN.is_match(trimmed)
}

/// A resolved name that should count as a real person.
pub fn is_countable_person(name: &str) -> bool {
    name != UNKNOWN_PERSON && !is_placeholder(name)
}

/// First usable candidate, trimmed.
pub fn first_valid_name<I, S>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|c| !is_placeholder(c.as_ref()))
        .map(|c| c.as_ref().trim().to_string())
}

/// Display name for a record, or `"Unknown"`.
pub fn resolve_person(record: &TransactionRecord) -> String {
    let canonical = std::iter::once(record.person.clone());
    let raw = PERSON_COLUMNS
        .iter()
        .map(|col| record.raw(col).map(|v| v.as_text()));

    first_valid_name(canonical.chain(raw)).unwrap_or_else(|| UNKNOWN_PERSON.to_string())
}

/// Local timestamp of a record.
///
/// The first non-blank date source is authoritative: if it does not parse,
/// later fallbacks are not consulted.
pub fn resolve_timestamp(record: &TransactionRecord) -> Option<NaiveDateTime> {
    if let Some(d) = record.date.as_deref().filter(|d| !d.trim().is_empty()) {
        return parse_timestamp(d);
    }

    DATE_COLUMNS
        .iter()
        .filter_map(|col| record.raw(col))
        .find(|v| !v.is_blank())
        .and_then(parse_cell_timestamp)
}

/// Day bucket key: `YYYY-MM-DD` or `"Unknown Date"`.
pub fn resolve_day(ts: Option<&NaiveDateTime>) -> String {
    ts.map(day_key)
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

pub fn infer_shift(ts: Option<&NaiveDateTime>) -> Shift {
    Shift::from_timestamp(ts.copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cell::CellValue;

    fn with_person(p: Option<&str>) -> TransactionRecord {
        TransactionRecord {
            person: p.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn placeholders() {
        for p in ["", "   ", "N/A", "n/a", "NA", "none", "None", "unknown", "UNKNOWN", "-", "n.a.", "N.A", "n.a"] {
            assert!(is_placeholder(p), "{p:?} should be a placeholder");
        }
        for p in ["John", "Nana", "Anne", "n/a John", "--"] {
            assert!(!is_placeholder(p), "{p:?} should be a real name");
        }
    }

    #[test]
    fn canonical_person_is_trimmed() {
        assert_eq!(resolve_person(&with_person(Some("  John  "))), "John");
    }

    #[test]
    fn falls_back_through_raw_columns_in_order() {
        let mut r = with_person(Some("N/A"));
        r.raw_fields.insert("User Full Name".into(), "-".into());
        r.raw_fields.insert("Name".into(), "Jane Doe".into());
        r.raw_fields.insert("Driver Name".into(), "".into());
        r.raw_fields.insert("Owner Name".into(), "Acme".into());
        assert_eq!(resolve_person(&r), "Jane Doe");
    }

    #[test]
    fn no_candidate_gives_unknown() {
        assert_eq!(resolve_person(&with_person(None)), UNKNOWN_PERSON);
        assert_eq!(resolve_person(&with_person(Some("none"))), UNKNOWN_PERSON);
        assert!(!is_countable_person(UNKNOWN_PERSON));
    }

    #[test]
    fn numeric_raw_name_is_text() {
        let mut r = with_person(None);
        r.raw_fields.insert("Driver".into(), CellValue::Number(1042.0));
        assert_eq!(resolve_person(&r), "1042");
    }

    #[test]
    fn date_prefers_canonical_then_raw() {
        let mut r = TransactionRecord::default();
        r.raw_fields.insert("Date".into(), "2024-02-10 07:00".into());
        r.raw_fields.insert("datetime".into(), "2024-02-11 07:00".into());
        assert_eq!(resolve_day(resolve_timestamp(&r).as_ref()), "2024-02-10");

        r.date = Some("2024-02-09".into());
        assert_eq!(resolve_day(resolve_timestamp(&r).as_ref()), "2024-02-09");
    }

    #[test]
    fn unparsable_canonical_date_is_unknown() {
        let mut r = TransactionRecord {
            date: Some("not-a-date".into()),
            ..Default::default()
        };
        r.raw_fields.insert("Date".into(), "2024-02-10".into());
        assert_eq!(resolve_day(resolve_timestamp(&r).as_ref()), UNKNOWN_DATE);
    }

    #[test]
    fn shift_from_record_time() {
        let r = TransactionRecord {
            date: Some("2024-02-10 23:15".into()),
            ..Default::default()
        };
        assert_eq!(infer_shift(resolve_timestamp(&r).as_ref()), Shift::Night);
        assert_eq!(infer_shift(None), Shift::Unknown);
    }
}
