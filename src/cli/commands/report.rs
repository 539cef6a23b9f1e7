use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{ReportLogic, ReportQuery};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        period,
        upload,
        json,
        shift_strategy,
    } = cmd
    {
        let mut pool = DbPool::open(&cfg.database)?;
        let query = ReportQuery {
            period: period.as_deref(),
            upload: *upload,
            shift_strategy: *shift_strategy,
        };

        let (report, assignments) = ReportLogic::build(&mut pool, cfg, &query)?;

        if *json {
            println!("{}", ReportLogic::render_json(&report)?);
            return Ok(());
        }

        if report.is_empty() {
            info("No records for the selected period.");
            return Ok(());
        }

        header(match period {
            Some(p) => format!("Weighbridge report: {p}"),
            None => "Weighbridge report".to_string(),
        });
        print!("{}", ReportLogic::render_text(&report, &assignments, cfg));
    }

    Ok(())
}
