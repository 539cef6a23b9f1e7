use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::assign::{AssignChange, AssignLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Assign {
        person,
        group,
        shift,
        clear_group,
        clear_shift,
        remove,
        list,
        import,
        export,
        force,
    } = cmd
    {
        let mut pool = DbPool::open(&cfg.database)?;

        if let Some(file) = import {
            let n = AssignLogic::import_file(&mut pool, &expand_tilde(file))?;
            success(format!("Merged assignments for {n} people"));
        }

        if let Some(person) = person {
            if *remove {
                if AssignLogic::remove(&mut pool, person)? {
                    success(format!("Removed assignments for {}", person.trim()));
                } else {
                    warning(format!("No assignments stored for {}", person.trim()));
                }
            } else {
                let change = AssignChange {
                    group: group.as_deref(),
                    shift: shift.as_deref(),
                    clear_group: *clear_group,
                    clear_shift: *clear_shift,
                };
                AssignLogic::apply(&mut pool, person, &change)?;
                success(format!("Updated {}", person.trim()));
            }
        }

        if let Some(file) = export {
            let path = expand_tilde(file);
            let n = AssignLogic::export_file(&mut pool, &path, *force)?;
            success(format!("Wrote assignments for {n} people to {}", path.display()));
        }

        if *list {
            AssignLogic::print_list(&mut pool)?;
        }
    }

    Ok(())
}
