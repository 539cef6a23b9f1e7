use super::ParsedFile;
use super::rows::{header_name, record_from_row};
use crate::errors::{AppError, AppResult};
use crate::models::cell::CellValue;
use crate::utils::excel_date::from_excel_serial;
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

/// Convert a calamine cell. Empty and error cells are dropped.
fn to_cell(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            Some(CellValue::text(s.as_str()))
        }
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            Some(match from_excel_serial(serial) {
                Some(ts) => CellValue::text(ts.format("%Y-%m-%d %H:%M:%S").to_string()),
                None => CellValue::Number(serial),
            })
        }
    }
}

/// Spreadsheet: chosen sheet (default: first), first non-empty row is the header.
pub(super) fn read(path: &Path, sheet: Option<&str>) -> AppResult<ParsedFile> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();

    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| {
                AppError::Import(format!(
                    "sheet '{wanted}' not found (available: {})",
                    names.join(", ")
                ))
            })?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| AppError::Import("workbook has no sheets".into()))?,
    };

    let range = workbook.worksheet_range(&name)?;
    let mut rows = range
        .rows()
        .skip_while(|row| row.iter().all(|c| to_cell(c).is_none_or(|v| v.is_blank())));

    let Some(header_row) = rows.next() else {
        return Err(AppError::Import(format!("sheet '{name}' is empty")));
    };

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, c)| header_name(&to_cell(c).map(|v| v.as_text()).unwrap_or_default(), i))
        .collect();

    let mut parsed = ParsedFile::default();
    for row in rows {
        match record_from_row(&headers, row.iter().map(to_cell)) {
            Some(r) => parsed.records.push(r),
            None => parsed.skipped_blank += 1,
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::path::PathBuf;

    fn write_fixture(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("weighlog-xlsx-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);

        let mut wb = Workbook::new();
        let ws = wb.add_worksheet();
        ws.set_name("Transactions").unwrap();

        // leading empty row, then the header
        for (col, h) in ["Driver Name", "Date", "Impounded", "Amount Due", "GVM Fine"]
            .iter()
            .enumerate()
        {
            ws.write_string(1, col as u16, *h).unwrap();
        }
        ws.write_string(2, 0, "John").unwrap();
        ws.write_string(2, 1, "2024-05-01 09:30").unwrap();
        ws.write_boolean(2, 2, true).unwrap();
        ws.write_number(2, 3, 100.0).unwrap();
        ws.write_number(2, 4, 25.5).unwrap();

        ws.write_string(4, 0, "Jane").unwrap();
        ws.write_number(4, 1, 45413.75).unwrap();
        ws.write_string(4, 2, "no").unwrap();

        wb.save(&path).unwrap();
        path
    }

    #[test]
    fn reads_first_sheet_with_typed_cells() {
        let path = write_fixture("typed.xlsx");
        let parsed = read(&path, None).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped_blank, 1);

        let john = &parsed.records[0];
        assert!(john.impounded);
        assert_eq!(john.row_revenue(), 125.5);
        assert_eq!(john.raw("Driver Name"), Some(&CellValue::text("John")));

        let jane = &parsed.records[1];
        assert!(!jane.impounded);
        assert_eq!(jane.raw("Date"), Some(&CellValue::Number(45413.75)));
    }

    #[test]
    fn named_sheet_lookup() {
        let path = write_fixture("named.xlsx");
        assert_eq!(read(&path, Some("transactions")).unwrap().records.len(), 2);
        assert!(matches!(read(&path, Some("Other")), Err(AppError::Import(_))));
    }
}
