use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User-curated person → group / person → shift lookups.
///
/// Keys are exact, case-sensitive display names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignments {
    #[serde(default)]
    pub person_to_group: BTreeMap<String, String>,
    #[serde(default)]
    pub person_to_shift: BTreeMap<String, String>,
}

impl Assignments {
    pub fn group_of(&self, person: &str) -> Option<&str> {
        non_empty(self.person_to_group.get(person))
    }

    pub fn shift_of(&self, person: &str) -> Option<&str> {
        non_empty(self.person_to_shift.get(person))
    }

    pub fn set_group(&mut self, person: &str, group: &str) {
        self.person_to_group
            .insert(person.to_string(), group.trim().to_string());
    }

    pub fn set_shift(&mut self, person: &str, shift: &str) {
        self.person_to_shift
            .insert(person.to_string(), shift.trim().to_string());
    }

    /// Every person named in either mapping, sorted.
    pub fn people(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .person_to_group
            .keys()
            .chain(self.person_to_shift.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Parse a `{ "personToGroup": {..}, "personToShift": {..} }` document.
    pub fn from_json(content: &str) -> AppResult<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;

        if !value.is_object() {
            return Err(AppError::InvalidInput(
                "assignment document must be a JSON object".into(),
            ));
        }

        serde_json::from_value(value).map_err(|e| {
            AppError::InvalidInput(format!("assignment mappings must map names to names: {e}"))
        })
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_read_as_unassigned() {
        let mut a = Assignments::default();
        a.set_group("John", "Team A");
        a.set_group("Jane", "   ");
        assert_eq!(a.group_of("John"), Some("Team A"));
        assert_eq!(a.group_of("Jane"), None);
        assert_eq!(a.group_of("john"), None);
    }

    #[test]
    fn json_document_roundtrip() {
        let a = Assignments::from_json(
            r#"{"personToGroup":{"John":"North"},"personToShift":{"Jane":"Night"}}"#,
        )
        .unwrap();
        assert_eq!(a.group_of("John"), Some("North"));
        assert_eq!(a.shift_of("Jane"), Some("Night"));
        assert_eq!(a.people(), vec!["Jane", "John"]);
    }

    #[test]
    fn non_mapping_is_invalid_input() {
        assert!(matches!(
            Assignments::from_json("[1,2,3]"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            Assignments::from_json(r#"{"personToGroup":["a"]}"#),
            Err(AppError::InvalidInput(_))
        ));
    }
}
