use crate::db::models::{StoredRecord, UploadRow};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::assignment::Assignments;
use crate::models::record::TransactionRecord;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Store one imported file and its records in a single transaction.
/// Returns the new upload id.
pub fn insert_upload(
    pool: &mut DbPool,
    file_name: &str,
    records: &[TransactionRecord],
) -> AppResult<i64> {
    let tx = pool.conn.transaction()?;

    tx.execute(
        "INSERT INTO uploads (file_name, imported_at, row_count) VALUES (?1, ?2, ?3)",
        params![file_name, Local::now().to_rfc3339(), records.len() as i64],
    )?;
    let upload_id = tx.last_insert_rowid();

    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO records (upload_id, person, date, impounded, payload)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;

        for r in records {
            let payload = serde_json::to_string(r)?;
            stmt.execute(params![upload_id, r.person, r.date, r.impounded, payload])?;
        }
    }

    tx.commit()?;
    Ok(upload_id)
}

fn map_record(row: &Row) -> rusqlite::Result<(i64, i64, String)> {
    Ok((row.get("id")?, row.get("upload_id")?, row.get("payload")?))
}

/// Load stored records in import order, optionally for a single upload.
pub fn load_records(pool: &mut DbPool, upload: Option<i64>) -> AppResult<Vec<StoredRecord>> {
    let rows: Vec<(i64, i64, String)> = match upload {
        Some(id) => {
            ensure_upload_exists(&pool.conn, id)?;
            let mut stmt = pool.conn.prepare(
                "SELECT id, upload_id, payload FROM records
                 WHERE upload_id = ?1
                 ORDER BY id ASC",
            )?;
            stmt.query_map([id], map_record)?
                .collect::<rusqlite::Result<_>>()?
        }
        None => {
            let mut stmt = pool
                .conn
                .prepare("SELECT id, upload_id, payload FROM records ORDER BY id ASC")?;
            stmt.query_map([], map_record)?
                .collect::<rusqlite::Result<_>>()?
        }
    };

    let mut out = Vec::with_capacity(rows.len());
    for (id, upload_id, payload) in rows {
        let record: TransactionRecord = serde_json::from_str(&payload)?;
        out.push(StoredRecord {
            id,
            upload_id,
            record,
        });
    }
    Ok(out)
}

pub fn list_uploads(pool: &mut DbPool) -> AppResult<Vec<UploadRow>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, file_name, imported_at, row_count FROM uploads ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(UploadRow {
            id: row.get(0)?,
            file_name: row.get(1)?,
            imported_at: row.get(2)?,
            row_count: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn ensure_upload_exists(conn: &Connection, id: i64) -> AppResult<()> {
    let found: Option<i64> = conn
        .query_row("SELECT id FROM uploads WHERE id = ?1", [id], |r| r.get(0))
        .optional()?;

    found.map(|_| ()).ok_or(AppError::UploadNotFound(id))
}

/// Delete an upload and its records. Returns the number of records removed.
pub fn delete_upload(pool: &mut DbPool, id: i64) -> AppResult<usize> {
    ensure_upload_exists(&pool.conn, id)?;

    let tx = pool.conn.transaction()?;
    let removed = tx.execute("DELETE FROM records WHERE upload_id = ?1", [id])?;
    tx.execute("DELETE FROM uploads WHERE id = ?1", [id])?;
    tx.commit()?;

    Ok(removed)
}

// ---------------------------
// Assignments
// ---------------------------

pub fn load_assignments(pool: &mut DbPool) -> AppResult<Assignments> {
    let mut stmt = pool
        .conn
        .prepare("SELECT person, grp, shift FROM assignments ORDER BY person ASC")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, Option<String>>(2)?,
        ))
    })?;

    let mut out = Assignments::default();
    for r in rows {
        let (person, group, shift) = r?;
        if let Some(g) = group.filter(|g| !g.trim().is_empty()) {
            out.set_group(&person, &g);
        }
        if let Some(s) = shift.filter(|s| !s.trim().is_empty()) {
            out.set_shift(&person, &s);
        }
    }
    Ok(out)
}

/// Which side of an assignment to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentField {
    Group,
    Shift,
}

/// Set (Some) or clear (None) one side of a person's assignment.
pub fn set_assignment(
    conn: &Connection,
    person: &str,
    field: AssignmentField,
    value: Option<&str>,
) -> AppResult<()> {
    let value = value.map(str::trim).filter(|v| !v.is_empty());
    let now = Local::now().to_rfc3339();

    let sql = match field {
        AssignmentField::Group => {
            "INSERT INTO assignments (person, grp, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(person) DO UPDATE SET grp = excluded.grp, updated_at = excluded.updated_at"
        }
        AssignmentField::Shift => {
            "INSERT INTO assignments (person, shift, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(person) DO UPDATE SET shift = excluded.shift, updated_at = excluded.updated_at"
        }
    };

    conn.execute(sql, params![person, value, now])?;

    // Rows with nothing left assigned are noise
    conn.execute(
        "DELETE FROM assignments WHERE person = ?1 AND grp IS NULL AND shift IS NULL",
        [person],
    )?;

    Ok(())
}

/// Remove a person from both mappings. Returns false if nothing was stored.
pub fn remove_assignment(conn: &Connection, person: &str) -> AppResult<bool> {
    let n = conn.execute("DELETE FROM assignments WHERE person = ?1", [person])?;
    Ok(n > 0)
}

/// Merge a whole mapping document into the store.
pub fn merge_assignments(pool: &mut DbPool, doc: &Assignments) -> AppResult<usize> {
    let tx = pool.conn.transaction()?;

    for (person, group) in &doc.person_to_group {
        set_assignment(&tx, person, AssignmentField::Group, Some(group))?;
    }
    for (person, shift) in &doc.person_to_shift {
        set_assignment(&tx, person, AssignmentField::Shift, Some(shift))?;
    }

    tx.commit()?;
    Ok(doc.people().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(person: &str) -> TransactionRecord {
        TransactionRecord {
            person: Some(person.into()),
            date: Some("2024-05-01 10:00".into()),
            amount_due: Some(10.0.into()),
            ..Default::default()
        }
    }

    #[test]
    fn upload_roundtrip_keeps_order_and_payload() {
        let mut pool = DbPool::in_memory().unwrap();
        let first = insert_upload(&mut pool, "a.csv", &[record("A"), record("B")]).unwrap();
        let second = insert_upload(&mut pool, "b.csv", &[record("C")]).unwrap();

        let all = load_records(&mut pool, None).unwrap();
        let names: Vec<_> = all
            .iter()
            .map(|r| r.record.person.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(all[0].record, record("A"));

        let only_second = load_records(&mut pool, Some(second)).unwrap();
        assert_eq!(only_second.len(), 1);
        assert_eq!(only_second[0].upload_id, second);

        let uploads = list_uploads(&mut pool).unwrap();
        assert_eq!(uploads.len(), 2);
        assert_eq!((uploads[0].id, uploads[0].row_count), (first, 2));
    }

    #[test]
    fn delete_upload_cascades() {
        let mut pool = DbPool::in_memory().unwrap();
        let id = insert_upload(&mut pool, "a.csv", &[record("A"), record("B")]).unwrap();

        assert_eq!(delete_upload(&mut pool, id).unwrap(), 2);
        assert!(load_records(&mut pool, None).unwrap().is_empty());
        assert!(matches!(
            delete_upload(&mut pool, id),
            Err(AppError::UploadNotFound(_))
        ));
        assert!(matches!(
            load_records(&mut pool, Some(99)),
            Err(AppError::UploadNotFound(99))
        ));
    }

    #[test]
    fn assignment_sides_are_independent() {
        let mut pool = DbPool::in_memory().unwrap();
        set_assignment(&pool.conn, "John", AssignmentField::Group, Some(" North ")).unwrap();
        set_assignment(&pool.conn, "John", AssignmentField::Shift, Some("Night")).unwrap();
        set_assignment(&pool.conn, "Jane", AssignmentField::Shift, Some("Day")).unwrap();

        let a = load_assignments(&mut pool).unwrap();
        assert_eq!(a.group_of("John"), Some("North"));
        assert_eq!(a.shift_of("John"), Some("Night"));
        assert_eq!(a.group_of("Jane"), None);

        set_assignment(&pool.conn, "John", AssignmentField::Group, None).unwrap();
        let a = load_assignments(&mut pool).unwrap();
        assert_eq!(a.group_of("John"), None);
        assert_eq!(a.shift_of("John"), Some("Night"));

        set_assignment(&pool.conn, "Jane", AssignmentField::Shift, Some("  ")).unwrap();
        assert!(!remove_assignment(&pool.conn, "Jane").unwrap());
        assert!(remove_assignment(&pool.conn, "John").unwrap());
        assert_eq!(load_assignments(&mut pool).unwrap(), Assignments::default());
    }

    #[test]
    fn merge_document() {
        let mut pool = DbPool::in_memory().unwrap();
        let mut doc = Assignments::default();
        doc.set_group("A", "G1");
        doc.set_shift("A", "S1");
        doc.set_shift("B", "S2");

        assert_eq!(merge_assignments(&mut pool, &doc).unwrap(), 2);
        assert_eq!(load_assignments(&mut pool).unwrap(), doc);
    }
}
