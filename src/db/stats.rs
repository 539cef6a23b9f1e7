use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

/// Row counts shown by `db --info`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DbCounts {
    pub uploads: i64,
    pub records: i64,
    pub impounded: i64,
    pub assigned_people: i64,
}

pub fn counts(pool: &mut DbPool) -> rusqlite::Result<DbCounts> {
    let count = |sql: &str| -> rusqlite::Result<i64> {
        pool.conn.query_row(sql, [], |row| row.get(0))
    };

    Ok(DbCounts {
        uploads: count("SELECT COUNT(*) FROM uploads")?,
        records: count("SELECT COUNT(*) FROM records")?,
        impounded: count("SELECT COUNT(*) FROM records WHERE impounded = 1")?,
        assigned_people: count("SELECT COUNT(*) FROM assignments")?,
    })
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTALS
    //
    let c = counts(pool)?;
    println!("{}• Uploads:{} {}{}{}", CYAN, RESET, GREEN, c.uploads, RESET);
    println!("{}• Records:{} {}{}{}", CYAN, RESET, GREEN, c.records, RESET);
    println!("{}• Impounded:{} {}", CYAN, RESET, c.impounded);
    println!("{}• Assigned people:{} {}", CYAN, RESET, c.assigned_people);

    //
    // 3) IMPORT RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT imported_at FROM uploads ORDER BY id ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT imported_at FROM uploads ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt = |v: Option<String>| v.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Imports:{}", CYAN, RESET);
    println!("    first: {}", fmt(first));
    println!("    last:  {}", fmt(last));

    //
    // 4) AVERAGE RECORDS/UPLOAD
    //
    if c.uploads > 0 {
        let avg = c.records as f64 / c.uploads as f64;
        println!("{}• Average records/upload:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::insert_upload;
    use crate::models::record::TransactionRecord;

    #[test]
    fn counts_follow_inserts() {
        let mut pool = DbPool::in_memory().unwrap();
        let r = TransactionRecord {
            impounded: true,
            ..Default::default()
        };
        insert_upload(&mut pool, "x.csv", &[r, TransactionRecord::default()]).unwrap();

        let c = counts(&mut pool).unwrap();
        assert_eq!(
            c,
            DbCounts {
                uploads: 1,
                records: 2,
                impounded: 1,
                assigned_people: 0,
            }
        );
    }
}
