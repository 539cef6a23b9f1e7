use super::ParsedFile;
use crate::errors::{AppError, AppResult};
use crate::models::record::TransactionRecord;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// JSON: a top-level array of record objects in canonical form.
pub(super) fn read(path: &Path) -> AppResult<ParsedFile> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

pub(super) fn parse(content: &str) -> AppResult<ParsedFile> {
    let value: Value = serde_json::from_str(content)?;

    let Value::Array(items) = value else {
        return Err(AppError::InvalidInput(
            "JSON upload must be an array of record objects".into(),
        ));
    };

    let mut parsed = ParsedFile::default();
    for (i, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return Err(AppError::InvalidInput(format!(
                "JSON upload item {} is not an object",
                i + 1
            )));
        }

        let record: TransactionRecord = serde_json::from_value(item)?;
        if record == TransactionRecord::default() {
            parsed.skipped_blank += 1;
        } else {
            parsed.records.push(record);
        }
    }

    Ok(parsed)
}
