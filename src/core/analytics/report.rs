//! Output model of the analytics engine.
//!
//! Plain data only: every type serializes to JSON and back.

use super::buckets::Buckets;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performer {
    pub name: String,
    pub count: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopGroup {
    pub name: String,
    pub count: u64,
    pub percentage: f64,
}

/// One point of the daily trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub day: String,
    pub total_count: u64,
    pub impounded_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_records: u64,
    pub impounded_records: u64,
    pub total_revenue: f64,
    pub unique_people: u64,
    pub avg_records_per_person: f64,
    pub impounded_rate: f64,
    pub top_performer: Option<Performer>,
    pub top_revenue_performer: Option<Performer>,
    pub top_group: Option<TopGroup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Danger,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Danger => "danger",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    ImpoundRate,
    Underperformers,
    Unassigned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub severity: Severity,
    pub kind: AlertKind,
    pub message: String,
}

/// The full report. In JSON, `byPerson`/`byGroup`/`byShift`/`byDay` are
/// arrays of `{key, count, impoundedCount, revenue}` in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub summary: Summary,
    pub by_person: Buckets,
    pub by_group: Buckets,
    pub by_shift: Buckets,
    pub by_day: Buckets,
    pub trend: Vec<TrendPoint>,
    pub alerts: Vec<Alert>,
}

impl AnalyticsReport {
    pub fn is_empty(&self) -> bool {
        self.summary.total_records == 0
    }

    pub fn alerts_of(&self, severity: Severity) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(move |a| a.severity == severity)
    }
}
