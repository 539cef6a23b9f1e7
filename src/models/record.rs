use super::{cell::CellValue, fine::FineField};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One weighbridge transaction, as delivered by an upload.
///
/// Canonical fields win; `raw_fields` keeps every original column and is
/// used as a fallback for person, date and amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub impounded: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_due: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gvm_fine: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d1_fine: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d2_fine: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d3_fine: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d4_fine: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awkward_load_fine: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_due_driver: Option<CellValue>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub raw_fields: BTreeMap<String, CellValue>,
}

impl TransactionRecord {
    /// Raw column lookup (exact header name).
    pub fn raw(&self, column: &str) -> Option<&CellValue> {
        self.raw_fields.get(column)
    }

    /// Canonical amount field, without any fallback.
    pub fn canonical_fine(&self, field: FineField) -> Option<&CellValue> {
        match field {
            FineField::AmountDue => self.amount_due.as_ref(),
            FineField::GvmFine => self.gvm_fine.as_ref(),
            FineField::D1Fine => self.d1_fine.as_ref(),
            FineField::D2Fine => self.d2_fine.as_ref(),
            FineField::D3Fine => self.d3_fine.as_ref(),
            FineField::D4Fine => self.d4_fine.as_ref(),
            FineField::AwkwardLoadFine => self.awkward_load_fine.as_ref(),
            FineField::AmountDueDriver => self.amount_due_driver.as_ref(),
        }
    }

    pub fn set_fine(&mut self, field: FineField, value: CellValue) {
        let slot = match field {
            FineField::AmountDue => &mut self.amount_due,
            FineField::GvmFine => &mut self.gvm_fine,
            FineField::D1Fine => &mut self.d1_fine,
            FineField::D2Fine => &mut self.d2_fine,
            FineField::D3Fine => &mut self.d3_fine,
            FineField::D4Fine => &mut self.d4_fine,
            FineField::AwkwardLoadFine => &mut self.awkward_load_fine,
            FineField::AmountDueDriver => &mut self.amount_due_driver,
        };
        *slot = Some(value);
    }

    /// Amount for one field: canonical value, else the raw column, else 0.
    pub fn amount(&self, field: FineField) -> f64 {
        self.canonical_fine(field)
            .or_else(|| self.raw(field.column()))
            .map(CellValue::as_amount)
            .unwrap_or(0.0)
    }

    /// Sum of the eight amount fields.
    pub fn row_revenue(&self) -> f64 {
        FineField::ALL.iter().map(|f| self.amount(*f)).sum()
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<CellValue>::deserialize(deserializer)?;
    Ok(value.map(|v| v.as_flag()).unwrap_or(false))
}
