use crate::models::cell::CellValue;
use crate::models::fine::FineField;
use crate::models::record::TransactionRecord;

/// Header name used for a column whose header cell is empty.
pub(super) fn header_name(raw: &str, index: usize) -> String {
    let h = raw.trim().trim_start_matches('\u{feff}').trim();
    if h.is_empty() {
        format!("Column {}", index + 1)
    } else {
        h.to_string()
    }
}

/// Build a record from one sheet row. Blank rows yield `None`.
///
/// Every non-blank cell lands in `raw_fields` under its header; the
/// "Impounded" column and the known fine columns also fill the
/// canonical fields.
pub fn record_from_row<I>(headers: &[String], cells: I) -> Option<TransactionRecord>
where
    I: IntoIterator<Item = Option<CellValue>>,
{
    let mut record = TransactionRecord::default();

    for (header, cell) in headers.iter().zip(cells) {
        let Some(cell) = cell.filter(|c| !c.is_blank()) else {
            continue;
        };

        if header.eq_ignore_ascii_case("impounded") {
            record.impounded = cell.as_flag();
        } else if let Some(field) = FineField::from_column(header) {
            record.set_fine(field, cell.clone());
        }

        record.raw_fields.insert(header.clone(), cell);
    }

    if record.raw_fields.is_empty() {
        None
    } else {
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(h: &[&str]) -> Vec<String> {
        h.iter().enumerate().map(|(i, s)| header_name(s, i)).collect()
    }

    #[test]
    fn canonical_fields_are_filled_from_headers() {
        let h = headers(&["Driver Name", "impounded", "gvm fine", "D1 Fine", "Notes"]);
        let r = record_from_row(
            &h,
            vec![
                Some("John".into()),
                Some("Y".into()),
                Some(CellValue::Number(250.0)),
                Some("R 1,000".into()),
                Some("ok".into()),
            ],
        )
        .unwrap();

        assert!(r.impounded);
        assert_eq!(r.gvm_fine, Some(CellValue::Number(250.0)));
        assert_eq!(r.row_revenue(), 1250.0);
        assert_eq!(r.raw("Driver Name"), Some(&CellValue::text("John")));
        assert_eq!(r.raw("Notes"), Some(&CellValue::text("ok")));
        assert!(r.person.is_none());
    }

    #[test]
    fn blank_rows_are_dropped() {
        let h = headers(&["A", "B"]);
        assert!(record_from_row(&h, vec![Some("  ".into()), None]).is_none());
    }

    #[test]
    fn empty_headers_get_positional_names() {
        let h = headers(&["\u{feff}Name", ""]);
        assert_eq!(h, vec!["Name".to_string(), "Column 2".to_string()]);
    }
}
