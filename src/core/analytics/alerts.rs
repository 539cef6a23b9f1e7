use super::options::AlertPolicy;
use super::report::{Alert, AlertKind, Severity};

/// Figures the alert rules look at.
pub(crate) struct AlertInputs<'a> {
    pub impounded_rate: f64,
    pub total_records: u64,
    pub avg_records_per_person: f64,
    /// Record counts of real (non-placeholder) people.
    pub person_counts: &'a [u64],
    pub unassigned_people: usize,
}

/// Evaluate the alert rules in order. Every matching rule emits one alert.
pub(crate) fn evaluate(inputs: &AlertInputs<'_>, policy: &AlertPolicy) -> Vec<Alert> {
    let mut alerts = Vec::new();

    // Impound rate: danger and warning are exclusive tiers
    let rate = inputs.impounded_rate;
    if rate > policy.danger_rate {
        alerts.push(Alert {
            severity: Severity::Danger,
            kind: AlertKind::ImpoundRate,
            message: format!(
                "High impound rate: {rate:.1}% of {} records were impounded (limit {:.0}%)",
                inputs.total_records, policy.danger_rate
            ),
        });
    } else if rate > policy.warning_rate {
        alerts.push(Alert {
            severity: Severity::Warning,
            kind: AlertKind::ImpoundRate,
            message: format!(
                "Elevated impound rate: {rate:.1}% of {} records were impounded (watch level {:.0}%)",
                inputs.total_records, policy.warning_rate
            ),
        });
    }

    let cutoff = inputs.avg_records_per_person * policy.underperformer_ratio;
    let below = inputs
        .person_counts
        .iter()
        .filter(|c| (**c as f64) < cutoff)
        .count();

    if below > 0 {
        alerts.push(Alert {
            severity: Severity::Warning,
            kind: AlertKind::Underperformers,
            message: format!(
                "{below} {} below {:.0}% of the average of {:.1} records per person",
                if below == 1 { "person is" } else { "people are" },
                policy.underperformer_ratio * 100.0,
                inputs.avg_records_per_person
            ),
        });
    }

    let unassigned = inputs.unassigned_people;
    if unassigned > 0 {
        alerts.push(Alert {
            severity: Severity::Info,
            kind: AlertKind::Unassigned,
            message: format!(
                "{unassigned} {} no group or shift assignment",
                if unassigned == 1 { "person has" } else { "people have" }
            ),
        });
    }

    alerts
}
