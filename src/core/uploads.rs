use crate::db::log::wlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_upload, list_uploads};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

pub struct UploadsLogic;

impl UploadsLogic {
    pub fn print_list(pool: &mut DbPool) -> AppResult<()> {
        let uploads = list_uploads(pool)?;
        if uploads.is_empty() {
            info("No uploads stored. Use `weighlog import <FILE>` first.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::right("ID"),
            Column::left("File"),
            Column::left("Imported at"),
            Column::right("Rows"),
        ]);

        for u in uploads {
            let when = chrono::DateTime::parse_from_rfc3339(&u.imported_at)
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or(u.imported_at);
            table.add_row(vec![
                u.id.to_string(),
                u.file_name,
                when,
                u.row_count.to_string(),
            ]);
        }

        print!("{}", table.render());
        Ok(())
    }

    /// Remove an upload with all of its records.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<usize> {
        let removed = delete_upload(pool, id)?;
        wlog_quiet(
            &pool.conn,
            "delete_upload",
            &id.to_string(),
            &format!("Deleted upload #{id} ({removed} records)"),
        );
        Ok(removed)
    }
}
