use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::plural;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import {
        file,
        format,
        sheet,
    } = cmd
    {
        let path = expand_tilde(file);
        let mut pool = DbPool::open(&cfg.database)?;

        let summary = ImportLogic::import(&mut pool, &path, *format, sheet.as_deref())?;

        success(format!(
            "Imported {} from {} as upload #{}",
            plural(summary.records, "record", "records"),
            summary.file_name,
            summary.upload_id
        ));
        if summary.skipped_blank > 0 {
            info(format!(
                "Skipped {}",
                plural(summary.skipped_blank, "blank row", "blank rows")
            ));
        }
    }

    Ok(())
}
