use crate::core::analytics::report::AnalyticsReport;
use crate::core::analytics::resolve::{UNASSIGNED, resolve_day, resolve_person, resolve_timestamp};
use crate::db::models::StoredRecord;
use crate::models::assignment::Assignments;
use serde::Serialize;

/// One stored record, flattened to resolved values.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RecordExport {
    pub id: i64,
    pub upload: i64,
    pub person: String,
    pub day: String,
    pub impounded: bool,
    pub revenue: f64,
}

/// One row of the per-person report table.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PersonExport {
    pub person: String,
    pub group: String,
    pub shift: String,
    pub records: u64,
    pub impounded: u64,
    pub revenue: f64,
}

pub(crate) const RECORD_HEADERS: [&str; 6] =
    ["id", "upload", "person", "day", "impounded", "revenue"];

pub(crate) const PERSON_HEADERS: [&str; 6] =
    ["person", "group", "shift", "records", "impounded", "revenue"];

pub(crate) const BUCKET_HEADERS: [&str; 4] = ["key", "records", "impounded", "revenue"];

pub(crate) fn record_rows(stored: &[StoredRecord]) -> Vec<RecordExport> {
    stored
        .iter()
        .map(|s| {
            let ts = resolve_timestamp(&s.record);
            RecordExport {
                id: s.id,
                upload: s.upload_id,
                person: resolve_person(&s.record),
                day: resolve_day(ts.as_ref()),
                impounded: s.record.impounded,
                revenue: s.record.row_revenue(),
            }
        })
        .collect()
}

pub(crate) fn person_rows(report: &AnalyticsReport, assignments: &Assignments) -> Vec<PersonExport> {
    report
        .by_person
        .iter()
        .map(|b| PersonExport {
            person: b.key.clone(),
            group: assignments.group_of(&b.key).unwrap_or(UNASSIGNED).to_string(),
            shift: assignments.shift_of(&b.key).unwrap_or(UNASSIGNED).to_string(),
            records: b.count,
            impounded: b.impounded_count,
            revenue: b.revenue,
        })
        .collect()
}
