use super::ParsedFile;
use super::rows::{header_name, record_from_row};
use crate::errors::{AppError, AppResult};
use crate::models::cell::CellValue;
use std::path::Path;

/// CSV: first row is the header, every cell is kept as text.
pub(super) fn read(path: &Path) -> AppResult<ParsedFile> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| header_name(h, i))
        .collect();

    if headers.iter().all(|h| h.starts_with("Column ")) {
        return Err(AppError::Import(format!(
            "{} has no header row",
            path.display()
        )));
    }

    let mut parsed = ParsedFile::default();
    for row in rdr.records() {
        let row = row?;
        let cells = row.iter().map(|c| Some(CellValue::text(c)));
        match record_from_row(&headers, cells) {
            Some(r) => parsed.records.push(r),
            None => parsed.skipped_blank += 1,
        }
    }

    Ok(parsed)
}
