//! Database row models for uploads and stored records.
//! These are thin wrappers around SQLite rows.

use crate::models::record::TransactionRecord;
use serde::Serialize;

/// One imported file.
#[derive(Debug, Clone, Serialize)]
pub struct UploadRow {
    pub id: i64,
    pub file_name: String,
    pub imported_at: String,
    pub row_count: i64,
}

/// A record as persisted, with its storage identity.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub id: i64,
    pub upload_id: i64,
    pub record: TransactionRecord,
}
