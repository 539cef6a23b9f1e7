use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::uploads::UploadsLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::plural;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Uploads { delete } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;

        match delete {
            Some(id) => {
                let removed = UploadsLogic::delete(&mut pool, *id)?;
                success(format!(
                    "Deleted upload #{id} ({})",
                    plural(removed, "record", "records")
                ));
            }
            None => UploadsLogic::print_list(&mut pool)?,
        }
    }

    Ok(())
}
