//! Date utilities: lenient timestamp parsing, day keys and period ranges.

use crate::errors::{AppError, AppResult};
use crate::models::cell::CellValue;
use crate::utils::excel_date::from_excel_serial;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%a %b %d %Y"];

// Numeric offsets without the RFC 3339 `T`/colon, and JS `Date#toString` output
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M %z",
    "%a %b %d %Y %H:%M:%S GMT%z",
];

/// Parse a weighbridge timestamp into local wall-clock time.
///
/// Offsets (RFC 3339) are converted to the local zone; naive values are
/// taken as already local. A bare date is local midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    // JS appends the zone name in parentheses: "... GMT+0200 (SAST)"
    let s = match s.find(" (") {
        Some(idx) if s.ends_with(')') => s[..idx].trim_end(),
        _ => s,
    };

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }

    None
}

/// Timestamp from a raw sheet cell; numbers are Excel serials.
pub fn parse_cell_timestamp(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::Text(s) => parse_timestamp(s),
        CellValue::Number(n) => from_excel_serial(*n),
        CellValue::Bool(_) => None,
    }
}

pub fn day_key(ts: &NaiveDateTime) -> String {
    ts.format(DAY_KEY_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DAY_KEY_FORMAT).ok()
}

/// Parse a --period expression into inclusive bounds.
///
/// Supports:
/// - `all` (no bounds)
/// - YYYY, YYYY-MM, YYYY-MM-DD
/// - YYYY:YYYY, YYYY-MM:YYYY-MM, YYYY-MM-DD:YYYY-MM-DD
pub fn parse_period(p: &str) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let p = p.trim();

    if p.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    let (start, end) = match p.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(AppError::InvalidPeriod(format!(
                    "start and end must have same format: {p}"
                )));
            }
            (period_bounds(s)?.0, period_bounds(e)?.1)
        }
        None => period_bounds(p)?,
    };

    if start > end {
        return Err(AppError::InvalidPeriod(format!("start is after end: {p}")));
    }

    Ok(Some((start, end)))
}

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
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), DAY_KEY_FORMAT)
                .map_err(|_| invalid())?;
            let next = d1.checked_add_months(chrono::Months::new(1)).ok_or_else(invalid)?;
            let d2 = next.pred_opt().ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_date(p).ok_or_else(invalid)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_common_weighbridge_timestamps() {
        let expected = ymd(2024, 3, 5).and_hms_opt(14, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-05 14:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-05T14:30"), Some(expected));
        assert_eq!(parse_timestamp("2024/03/05 14:30"), Some(expected));
        assert_eq!(parse_timestamp("05/03/2024 14:30"), Some(expected));
    }

    #[test]
    fn numeric_offsets_convert_to_local() {
        let utc = DateTime::parse_from_rfc3339("2024-01-01T08:00:00Z").unwrap();
        let expected = utc.with_timezone(&Local).naive_local();
        assert_eq!(parse_timestamp("2024-01-01 10:00:00 +0200"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01 10:00 +0200"), Some(expected));
        assert_eq!(
            parse_timestamp("Mon Jan 01 2024 10:00:00 GMT+0200 (South Africa Standard Time)"),
            Some(expected)
        );
        assert_eq!(parse_timestamp("Mon Jan 01 2024 10:00:00 GMT+0200"), Some(expected));
    }

    #[test]
    fn js_date_string_without_time() {
        let ts = parse_timestamp("Mon Jan 01 2024").unwrap();
        assert_eq!(ts, ymd(2024, 1, 1).and_time(NaiveTime::MIN));
    }

    #[test]
    fn bare_date_is_local_midnight() {
        let ts = parse_timestamp("2024-01-01").unwrap();
        assert_eq!(day_key(&ts), "2024-01-01");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("not-a-date"), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
    }

    #[test]
    fn excel_serial_cells() {
        let ts = parse_cell_timestamp(&CellValue::Number(45292.25)).unwrap();
        assert_eq!(day_key(&ts), "2024-01-01");
        assert_eq!(parse_cell_timestamp(&CellValue::Bool(true)), None);
    }

    #[test]
    fn period_forms() {
        assert_eq!(parse_period("all").unwrap(), None);
        assert_eq!(
            parse_period("2024").unwrap(),
            Some((ymd(2024, 1, 1), ymd(2024, 12, 31)))
        );
        assert_eq!(
            parse_period("2024-02").unwrap(),
            Some((ymd(2024, 2, 1), ymd(2024, 2, 29)))
        );
        assert_eq!(
            parse_period("2024-01-03:2024-01-09").unwrap(),
            Some((ymd(2024, 1, 3), ymd(2024, 1, 9)))
        );
        assert_eq!(
            parse_period("2023-11:2024-01").unwrap(),
            Some((ymd(2023, 11, 1), ymd(2024, 1, 31)))
        );
    }

    #[test]
    fn bad_periods() {
        assert!(matches!(parse_period("2024:2024-01"), Err(AppError::InvalidPeriod(_))));
        assert!(matches!(parse_period("2024-13"), Err(AppError::InvalidPeriod(_))));
        assert!(matches!(parse_period("2025:2024"), Err(AppError::InvalidPeriod(_))));
        assert!(matches!(parse_period("yesterday"), Err(AppError::InvalidPeriod(_))));
    }
}
