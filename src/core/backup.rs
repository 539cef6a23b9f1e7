use crate::config::Config;
use crate::db::log::wlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::export::ensure_writable;
use crate::ui::messages::{info, success};
use crate::utils::path::display_name;
use chrono::Local;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally zipped.
    /// Returns the path actually written.
    pub fn backup(cfg: &Config, dest_file: &str, compress: bool, force: bool) -> AppResult<PathBuf> {
        let src = Path::new(&cfg.database);
        let dest = Path::new(dest_file);

        // 1️⃣ Check DB exists
        if !src.exists() {
            return Err(AppError::from(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )));
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let final_path = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };
        ensure_writable(&final_path, force)?;

        // 3️⃣ Copy (or zip) database
        if compress {
            zip_file(src, &final_path)?;
            info(format!("Compressed: {}", final_path.display()));
        } else {
            fs::copy(src, &final_path)?;
        }
        success(format!("Backup created: {}", final_path.display()));

        // 4️⃣ Log in DB
        if let Ok(conn) = Connection::open(src) {
            wlog_quiet(
                &conn,
                "backup",
                &final_path.to_string_lossy(),
                if compress {
                    "Backup created and compressed"
                } else {
                    "Backup created"
                },
            );
        }

        Ok(final_path)
    }
}

/// Zip a populated database next to itself before its schema changes.
pub fn backup_before_migration(db_path: &str) -> AppResult<PathBuf> {
    let src = Path::new(db_path);
    let dir = src.parent().unwrap_or_else(|| Path::new("."));

    let backup_path = dir.join(format!(
        "{}-{}-pre-migration.zip",
        Local::now().format("%Y%m%d_%H%M%S"),
        src.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "weighlog".into())
    ));

    zip_file(src, &backup_path)?;
    success(format!("Pre-migration backup: {}", backup_path.display()));
    Ok(backup_path)
}

/// Write `src` as the single entry of a new zip archive at `zip_path`.
fn zip_file(src: &Path, zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(src)?;
    zip.start_file(display_name(src), options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(())
}
