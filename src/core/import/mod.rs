//! Upload readers: turn a CSV, spreadsheet or JSON file into records and
//! store them as one upload batch.

mod csv_reader;
mod json_reader;
mod rows;
mod xlsx_reader;

use crate::db::log::wlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::insert_upload;
use crate::errors::{AppError, AppResult};
use crate::models::record::TransactionRecord;
use crate::utils::path::{display_name, extension_of};
use clap::ValueEnum;
use std::path::Path;

pub use rows::record_from_row;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ImportFormat {
    /// Detect from the file extension
    #[default]
    Auto,
    Csv,
    Json,
    Xlsx,
}

/// Reader actually used for a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Csv,
    Json,
    Spreadsheet,
}

impl ImportFormat {
    /// Concrete reader for a file, resolving `Auto` from the extension.
    pub fn resolve(self, path: &Path) -> AppResult<SourceKind> {
        match self {
            ImportFormat::Csv => return Ok(SourceKind::Csv),
            ImportFormat::Json => return Ok(SourceKind::Json),
            ImportFormat::Xlsx => return Ok(SourceKind::Spreadsheet),
            ImportFormat::Auto => {}
        }

        match extension_of(path).as_deref() {
            Some("csv") | Some("txt") => Ok(SourceKind::Csv),
            Some("json") => Ok(SourceKind::Json),
            Some("xlsx") | Some("xlsm") | Some("xlsb") | Some("xls") | Some("ods") => {
                Ok(SourceKind::Spreadsheet)
            }
            Some(other) => Err(AppError::UnsupportedFormat(other.to_string())),
            None => Err(AppError::UnsupportedFormat(format!(
                "cannot detect format of '{}' (use --format)",
                path.display()
            ))),
        }
    }
}

/// Records read from a file plus how many blank rows were dropped.
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub records: Vec<TransactionRecord>,
    pub skipped_blank: usize,
}

#[derive(Debug)]
pub struct ImportSummary {
    pub upload_id: i64,
    pub file_name: String,
    pub records: usize,
    pub skipped_blank: usize,
}

pub struct ImportLogic;

impl ImportLogic {
    /// Parse a file without touching the database.
    pub fn read_file(
        path: &Path,
        format: ImportFormat,
        sheet: Option<&str>,
    ) -> AppResult<ParsedFile> {
        if !path.exists() {
            return Err(AppError::Import(format!(
                "file not found: {}",
                path.display()
            )));
        }

        match format.resolve(path)? {
            SourceKind::Csv => csv_reader::read(path),
            SourceKind::Json => json_reader::read(path),
            SourceKind::Spreadsheet => xlsx_reader::read(path, sheet),
        }
    }

    /// Parse a file and store it as a new upload.
    pub fn import(
        pool: &mut DbPool,
        path: &Path,
        format: ImportFormat,
        sheet: Option<&str>,
    ) -> AppResult<ImportSummary> {
        let parsed = Self::read_file(path, format, sheet)?;
        let file_name = display_name(path);

        if parsed.records.is_empty() {
            return Err(AppError::Import(format!(
                "no records found in {file_name}"
            )));
        }

        let upload_id = insert_upload(pool, &file_name, &parsed.records)?;

        wlog_quiet(
            &pool.conn,
            "import",
            &file_name,
            &format!(
                "Imported {} records as upload #{}",
                parsed.records.len(),
                upload_id
            ),
        );

        Ok(ImportSummary {
            upload_id,
            file_name,
            records: parsed.records.len(),
            skipped_blank: parsed.skipped_blank,
        })
    }
}
