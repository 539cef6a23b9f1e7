use crate::core::analytics::resolve::{UNASSIGNED, is_placeholder};
use crate::db::log::wlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{
    AssignmentField, load_assignments, merge_assignments, remove_assignment, set_assignment,
};
use crate::errors::{AppError, AppResult};
use crate::export::ensure_writable;
use crate::models::assignment::Assignments;
use crate::ui::messages::info;
use crate::utils::colors::colorize_bucket;
use crate::utils::table::{Column, Table};
use std::fs;
use std::path::Path;

/// Requested change to one person's mapping.
#[derive(Debug, Default)]
pub struct AssignChange<'a> {
    pub group: Option<&'a str>,
    pub shift: Option<&'a str>,
    pub clear_group: bool,
    pub clear_shift: bool,
}

impl AssignChange<'_> {
    fn is_empty(&self) -> bool {
        self.group.is_none() && self.shift.is_none() && !self.clear_group && !self.clear_shift
    }

    fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(g) = self.group {
            parts.push(format!("group={}", g.trim()));
        }
        if self.clear_group {
            parts.push("group cleared".to_string());
        }
        if let Some(s) = self.shift {
            parts.push(format!("shift={}", s.trim()));
        }
        if self.clear_shift {
            parts.push("shift cleared".to_string());
        }
        parts.join(", ")
    }
}

pub struct AssignLogic;

impl AssignLogic {
    fn check_person(person: &str) -> AppResult<&str> {
        let p = person.trim();
        if is_placeholder(p) {
            return Err(AppError::InvalidInput(format!(
                "'{person}' is not a valid person name"
            )));
        }
        Ok(p)
    }

    /// Apply a change to one person's group and/or shift.
    pub fn apply(pool: &mut DbPool, person: &str, change: &AssignChange) -> AppResult<()> {
        let person = Self::check_person(person)?;

        if change.is_empty() {
            return Err(AppError::InvalidInput(
                "nothing to change: use --group, --shift, --clear-group or --clear-shift".into(),
            ));
        }
        if (change.group.is_some() && change.clear_group)
            || (change.shift.is_some() && change.clear_shift)
        {
            return Err(AppError::InvalidInput(
                "cannot set and clear the same field".into(),
            ));
        }

        let tx = pool.conn.transaction()?;
        if let Some(g) = change.group {
            set_assignment(&tx, person, AssignmentField::Group, Some(g))?;
        }
        if change.clear_group {
            set_assignment(&tx, person, AssignmentField::Group, None)?;
        }
        if let Some(s) = change.shift {
            set_assignment(&tx, person, AssignmentField::Shift, Some(s))?;
        }
        if change.clear_shift {
            set_assignment(&tx, person, AssignmentField::Shift, None)?;
        }
        tx.commit()?;

        wlog_quiet(&pool.conn, "assign", person, &change.describe());
        Ok(())
    }

    /// Drop a person from both mappings. Returns false when nothing was stored.
    pub fn remove(pool: &mut DbPool, person: &str) -> AppResult<bool> {
        let person = person.trim();
        let removed = remove_assignment(&pool.conn, person)?;
        if removed {
            wlog_quiet(&pool.conn, "unassign", person, "Assignment removed");
        }
        Ok(removed)
    }

    pub fn print_list(pool: &mut DbPool) -> AppResult<()> {
        let a = load_assignments(pool)?;
        let people = a.people();

        if people.is_empty() {
            info("No assignments stored.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::left("Person"),
            Column::left("Group"),
            Column::left("Shift"),
        ]);
        for p in people {
            table.add_row(vec![
                p.to_string(),
                colorize_bucket(a.group_of(p).unwrap_or(UNASSIGNED)),
                colorize_bucket(a.shift_of(p).unwrap_or(UNASSIGNED)),
            ]);
        }
        print!("{}", table.render());
        Ok(())
    }

    /// Merge a `{ personToGroup, personToShift }` JSON document.
    /// Returns the number of people touched.
    pub fn import_file(pool: &mut DbPool, path: &Path) -> AppResult<usize> {
        let content = fs::read_to_string(path)?;
        let doc = Assignments::from_json(&content)?;

        for person in doc.people() {
            Self::check_person(person)?;
        }

        let n = merge_assignments(pool, &doc)?;
        wlog_quiet(
            &pool.conn,
            "assign_import",
            &path.to_string_lossy(),
            &format!("Merged assignments for {n} people"),
        );
        Ok(n)
    }

    /// Write the stored mapping as a JSON document.
    pub fn export_file(pool: &mut DbPool, path: &Path, force: bool) -> AppResult<usize> {
        ensure_writable(path, force)?;
        let doc = load_assignments(pool)?;
        fs::write(path, serde_json::to_string_pretty(&doc)?)?;
        Ok(doc.people().len())
    }
}
