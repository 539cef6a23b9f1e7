use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        period,
        upload,
        report,
        force,
    } = cmd
    {
        let mut pool = DbPool::open(&cfg.database)?;
        let req = ExportRequest {
            format: *format,
            file,
            period: period.as_deref(),
            upload: *upload,
            report: *report,
            force: *force,
        };
        ExportLogic::export(&mut pool, cfg, &req)?;
    }
    Ok(())
}
