//! Analytics engine: folds weighbridge records into per-person, per-group,
//! per-shift and per-day aggregates, summary statistics and alerts.
//!
//! The engine is a pure function of its inputs. Malformed records never
//! fail a computation; they land in the "Unknown" / "Unassigned" /
//! "Unknown Date" buckets or contribute zero revenue.

mod alerts;
pub mod buckets;
pub mod options;
pub mod report;
pub mod resolve;


use crate::errors::AppResult;
use crate::models::{assignment::Assignments, record::TransactionRecord};
use alerts::AlertInputs;
use buckets::Buckets;
use options::{ReportOptions, ShiftStrategy};
use report::{AnalyticsReport, Performer, Summary, TopGroup, TrendPoint};
use resolve::{UNASSIGNED, UNKNOWN_DATE, is_countable_person};
use std::collections::HashSet;

/// Build a report after validating the options.
pub fn compute_report(
    records: &[TransactionRecord],
    assignments: &Assignments,
    options: &ReportOptions,
) -> AppResult<AnalyticsReport> {
    options.policy.validate()?;
    Ok(aggregate(records, assignments, options))
}

/// Build a report with the default alert policy and assignment-based shifts.
pub fn compute_default_report(
    records: &[TransactionRecord],
    assignments: &Assignments,
) -> AnalyticsReport {
    aggregate(records, assignments, &ReportOptions::default())
}

fn aggregate(
    records: &[TransactionRecord],
    assignments: &Assignments,
    options: &ReportOptions,
) -> AnalyticsReport {
    let mut by_person = Buckets::default();
    let mut by_group = Buckets::default();
    let mut by_shift = Buckets::default();
    let mut by_day = Buckets::default();

    let mut unassigned: HashSet<String> = HashSet::new();
    let mut impounded_records = 0u64;
    let mut total_revenue = 0.0;

    for record in records {
        let person = resolve::resolve_person(record);
        let ts = resolve::resolve_timestamp(record);
        let revenue = record.row_revenue();
        let impounded = record.impounded;

        let group = assignments.group_of(&person).unwrap_or(UNASSIGNED);
        let shift = match options.shift_strategy {
            ShiftStrategy::Assignment => assignments.shift_of(&person).unwrap_or(UNASSIGNED),
            ShiftStrategy::Timestamp => resolve::infer_shift(ts.as_ref()).label(),
            ShiftStrategy::AssignmentThenTimestamp => assignments
                .shift_of(&person)
                .unwrap_or_else(|| resolve::infer_shift(ts.as_ref()).label()),
        };
        let day = resolve::resolve_day(ts.as_ref());

        if is_countable_person(&person)
            && (group == UNASSIGNED || shift == UNASSIGNED)
            && !unassigned.contains(&person)
        {
            unassigned.insert(person.clone());
        }

        by_person.record(&person, impounded, revenue);
        by_group.record(group, impounded, revenue);
        by_shift.record(shift, impounded, revenue);
        by_day.record(&day, impounded, revenue);

        if impounded {
            impounded_records += 1;
        }
        total_revenue += revenue;
    }

    let total_records = records.len() as u64;

    let person_counts: Vec<u64> = by_person
        .iter()
        .filter(|b| is_countable_person(&b.key))
        .map(|b| b.count)
        .collect();
    let unique_people = person_counts.len() as u64;

    let avg_records_per_person = if unique_people == 0 {
        0.0
    } else {
        total_records as f64 / unique_people as f64
    };

    let impounded_rate = percentage(impounded_records, total_records);

    let as_performer = |b: &buckets::Bucket| Performer {
        name: b.key.clone(),
        count: b.count,
        revenue: b.revenue,
    };

    let top_performer = by_person
        .first_max_by(|b| is_countable_person(&b.key), |b| b.count as f64)
        .map(as_performer);

    let top_revenue_performer = by_person
        .first_max_by(|b| is_countable_person(&b.key), |b| b.revenue)
        .map(as_performer);

    let top_group = by_group
        .first_max_by(|_| true, |b| b.count as f64)
        .map(|b| TopGroup {
            name: b.key.clone(),
            count: b.count,
            percentage: percentage(b.count, total_records),
        });

    let mut trend: Vec<TrendPoint> = by_day
        .iter()
        .filter(|b| b.key != UNKNOWN_DATE)
        .map(|b| TrendPoint {
            day: b.key.clone(),
            total_count: b.count,
            impounded_count: b.impounded_count,
        })
        .collect();
    // YYYY-MM-DD sorts chronologically
    trend.sort_by(|a, b| a.day.cmp(&b.day));

    let alerts = alerts::evaluate(
        &AlertInputs {
            impounded_rate,
            total_records,
            avg_records_per_person,
            person_counts: &person_counts,
            unassigned_people: unassigned.len(),
        },
        &options.policy,
    );

    AnalyticsReport {
        summary: Summary {
            total_records,
            impounded_records,
            total_revenue,
            unique_people,
            avg_records_per_person,
            impounded_rate,
            top_performer,
            top_revenue_performer,
            top_group,
        },
        by_person,
        by_group,
        by_shift,
        by_day,
        trend,
        alerts,
    }
}

fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
