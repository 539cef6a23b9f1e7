//! Raw spreadsheet cell values as they arrive from an upload.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell from an uploaded sheet.
///
/// Values are kept as close to the source as possible; numeric coercion is
/// deferred until aggregation so a bad cell never blocks an import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// True for empty / whitespace-only text. Numbers and booleans are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Cell rendered as text, the way it would appear in the sheet.
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// Numeric amount held by the cell.
    ///
    /// Anything that is not a finite number yields 0.
    pub fn as_amount(&self) -> f64 {
        match self {
            CellValue::Number(n) if n.is_finite() => *n,
            CellValue::Number(_) | CellValue::Bool(_) => 0.0,
            CellValue::Text(s) => parse_amount(s),
        }
    }

    /// Interpret the cell as a yes/no flag (impounded column).
    pub fn as_flag(&self) -> bool {
        match self {
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n != 0.0,
            CellValue::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "y" | "yes" | "true" | "1" | "x"
            ),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// Parse a money-like string ("R 1,250.00", "$30", "  12.5 ").
/// Unparsable or non-finite input yields 0.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let without_symbol = trimmed
        .strip_prefix(&['R', '$', '€', '£'][..])
        .unwrap_or(trimmed);

    let cleaned: String = without_symbol
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_from_plain_and_decorated_text() {
        assert_eq!(parse_amount("100"), 100.0);
        assert_eq!(parse_amount(" 12.5 "), 12.5);
        assert_eq!(parse_amount("R 1,250.00"), 1250.0);
        assert_eq!(parse_amount("$30"), 30.0);
    }

    #[test]
    fn amount_garbage_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
        assert_eq!(CellValue::Number(f64::NAN).as_amount(), 0.0);
        assert_eq!(CellValue::Bool(true).as_amount(), 0.0);
    }

    #[test]
    fn display_drops_trailing_zero_fraction() {
        assert_eq!(CellValue::Number(42.0).as_text(), "42");
        assert_eq!(CellValue::Number(4.5).as_text(), "4.5");
    }

    #[test]
    fn untagged_json_shapes() {
        let v: Vec<CellValue> = serde_json::from_str(r#"[true, 100, 2.5, "x"]"#).unwrap();
        assert_eq!(
            v,
            vec![
                CellValue::Bool(true),
                CellValue::Number(100.0),
                CellValue::Number(2.5),
                CellValue::text("x"),
            ]
        );
    }

    #[test]
    fn flags() {
        assert!(CellValue::text("Yes").as_flag());
        assert!(CellValue::Number(1.0).as_flag());
        assert!(!CellValue::text("no").as_flag());
        assert!(!CellValue::text("").as_flag());
    }
}
