use crate::config::Config;
use crate::core::analytics::buckets::{Bucket, Buckets};
use crate::core::analytics::options::ShiftStrategy;
use crate::core::analytics::report::AnalyticsReport;
use crate::core::analytics::resolve::{UNASSIGNED, resolve_timestamp};
use crate::core::analytics::compute_report;
use crate::db::pool::DbPool;
use crate::db::queries::{load_assignments, load_records};
use crate::errors::AppResult;
use crate::models::assignment::Assignments;
use crate::models::record::TransactionRecord;
use crate::ui::messages::alert_prefix;
use crate::utils::colors::{RESET, color_for_rate, colorize_bucket};
use crate::utils::date::parse_period;
use crate::utils::formatting::{bold, money, percent};
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

const WRAP_WIDTH: usize = 72;
const ALERT_INDENT: usize = 11;

/// Selection applied before aggregation.
#[derive(Debug, Default, Clone)]
pub struct ReportQuery<'a> {
    pub period: Option<&'a str>,
    pub upload: Option<i64>,
    pub shift_strategy: Option<ShiftStrategy>,
}

pub struct ReportLogic;

impl ReportLogic {
    /// True when the record's day falls inside `bounds` (inclusive).
    /// Without bounds everything matches; with bounds, undated records never do.
    pub fn in_period(record: &TransactionRecord, bounds: Option<(NaiveDate, NaiveDate)>) -> bool {
        match bounds {
            None => true,
            Some((start, end)) => resolve_timestamp(record)
                .map(|ts| (start..=end).contains(&ts.date()))
                .unwrap_or(false),
        }
    }

    pub fn filter_by_period(
        records: Vec<TransactionRecord>,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> Vec<TransactionRecord> {
        records
            .into_iter()
            .filter(|r| Self::in_period(r, bounds))
            .collect()
    }

    /// Load, filter and aggregate. Returns the assignments used so callers
    /// can render group/shift columns from the same snapshot.
    pub fn build(
        pool: &mut DbPool,
        cfg: &Config,
        query: &ReportQuery,
    ) -> AppResult<(AnalyticsReport, Assignments)> {
        let bounds = match query.period {
            Some(p) => parse_period(p)?,
            None => None,
        };

        let records: Vec<TransactionRecord> = load_records(pool, query.upload)?
            .into_iter()
            .map(|s| s.record)
            .collect();
        let records = Self::filter_by_period(records, bounds);

        let assignments = load_assignments(pool)?;

        let mut options = cfg.report_options();
        if let Some(s) = query.shift_strategy {
            options.shift_strategy = s;
        }

        let report = compute_report(&records, &assignments, &options)?;
        Ok((report, assignments))
    }

    pub fn render_json(report: &AnalyticsReport) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Human-readable report for the terminal.
    pub fn render_text(report: &AnalyticsReport, assignments: &Assignments, cfg: &Config) -> String {
        let mut out = String::new();
        let s = &report.summary;
        let sym = cfg.currency_symbol.as_str();

        out.push_str(&section("Summary"));
        let rate_color = color_for_rate(
            s.impounded_rate,
            cfg.impound_warning_rate,
            cfg.impound_danger_rate,
        );
        out.push_str(&format!(
            "Records      : {} ({} impounded, {}{}{})\n",
            s.total_records,
            s.impounded_records,
            rate_color,
            percent(s.impounded_rate),
            RESET
        ));
        out.push_str(&format!("Revenue      : {}\n", money(s.total_revenue, sym)));
        out.push_str(&format!(
            "People       : {} (avg {:.2} records/person)\n",
            s.unique_people, s.avg_records_per_person
        ));
        if let Some(p) = &s.top_performer {
            out.push_str(&format!("Top performer: {} ({} records)\n", p.name, p.count));
        }
        if let Some(p) = &s.top_revenue_performer {
            out.push_str(&format!(
                "Top revenue  : {} ({})\n",
                p.name,
                money(p.revenue, sym)
            ));
        }
        if let Some(g) = &s.top_group {
            out.push_str(&format!(
                "Top group    : {} ({} records, {})\n",
                colorize_bucket(&g.name),
                g.count,
                percent(g.percentage)
            ));
        }

        if !report.alerts.is_empty() {
            out.push_str(&section("Alerts"));
            let indent = " ".repeat(ALERT_INDENT);
            for a in &report.alerts {
                let lines = textwrap::wrap(&a.message, WRAP_WIDTH - ALERT_INDENT);
                for (i, line) in lines.iter().enumerate() {
                    if i == 0 {
                        out.push_str(&format!("{} {}\n", alert_prefix(a.severity), line));
                    } else {
                        out.push_str(&format!("{indent}{line}\n"));
                    }
                }
            }
        }

        out.push_str(&section("By person"));
        let mut people = Table::new(vec![
            Column::left("Person"),
            Column::left("Group"),
            Column::left("Shift"),
            Column::right("Records"),
            Column::right("Impounded"),
            Column::right("Revenue"),
        ]);
        for b in report.by_person.iter() {
            people.add_row(vec![
                colorize_bucket(&b.key),
                colorize_bucket(assignments.group_of(&b.key).unwrap_or(UNASSIGNED)),
                colorize_bucket(assignments.shift_of(&b.key).unwrap_or(UNASSIGNED)),
                b.count.to_string(),
                b.impounded_count.to_string(),
                money(b.revenue, sym),
            ]);
        }
        out.push_str(&people.render());

        out.push_str(&section("By group"));
        out.push_str(&bucket_table("Group", &report.by_group, s.total_records, sym));

        out.push_str(&section("By shift"));
        out.push_str(&bucket_table("Shift", &report.by_shift, s.total_records, sym));

        if !report.trend.is_empty() {
            out.push_str(&section("Daily trend"));
            let mut trend = Table::new(vec![
                Column::left("Day"),
                Column::right("Records"),
                Column::right("Impounded"),
            ]);
            for t in &report.trend {
                trend.add_row(vec![
                    t.day.clone(),
                    t.total_count.to_string(),
                    t.impounded_count.to_string(),
                ]);
            }
            out.push_str(&trend.render());
        }

        out
    }
}

fn section(title: &str) -> String {
    format!("\n{}\n", bold(title))
}

fn bucket_table(label: &str, buckets: &Buckets, total: u64, sym: &str) -> String {
    let mut table = Table::new(vec![
        Column::left(label),
        Column::right("Records"),
        Column::right("Share"),
        Column::right("Impounded"),
        Column::right("Revenue"),
    ]);
    for b in buckets.iter() {
        table.add_row(bucket_row(b, total, sym));
    }
    table.render()
}

fn bucket_row(b: &Bucket, total: u64, sym: &str) -> Vec<String> {
    let share = if total == 0 {
        0.0
    } else {
        b.count as f64 / total as f64 * 100.0
    };
    vec![
        colorize_bucket(&b.key),
        b.count.to_string(),
        percent(share),
        b.impounded_count.to_string(),
        money(b.revenue, sym),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::{insert_upload, set_assignment, AssignmentField};
    use crate::utils::colors::strip_ansi;

    fn rec(person: &str, date: &str, impounded: bool, amount: f64) -> TransactionRecord {
        TransactionRecord {
            person: Some(person.into()),
            date: Some(date.into()),
            impounded,
            amount_due: Some(amount.into()),
            ..Default::default()
        }
    }

    fn seeded() -> DbPool {
        let mut pool = DbPool::in_memory().unwrap();
        insert_upload(
            &mut pool,
            "may.csv",
            &[
                rec("John", "2024-05-01 09:00", false, 100.0),
                rec("John", "2024-05-02 15:00", true, 50.0),
                rec("Jane", "not a date", false, 10.0),
            ],
        )
        .unwrap();
        insert_upload(&mut pool, "june.csv", &[rec("Jane", "2024-06-01 08:00", false, 5.0)])
            .unwrap();
        pool
    }

    #[test]
    fn period_filter_drops_undated_records() {
        let mut pool = seeded();
        let cfg = Config::default();

        let (all, _) = ReportLogic::build(&mut pool, &cfg, &ReportQuery::default()).unwrap();
        assert_eq!(all.summary.total_records, 4);
        assert!(all.by_day.get("Unknown Date").is_some());

        let query = ReportQuery {
            period: Some("2024-05"),
            ..Default::default()
        };
        let (may, _) = ReportLogic::build(&mut pool, &cfg, &query).unwrap();
        assert_eq!(may.summary.total_records, 2);
        assert_eq!(may.summary.unique_people, 1);
        assert!(may.by_day.get("Unknown Date").is_none());
    }

    #[test]
    fn upload_and_strategy_selection() {
        let mut pool = seeded();
        let cfg = Config::default();

        let query = ReportQuery {
            upload: Some(2),
            shift_strategy: Some(ShiftStrategy::Timestamp),
            ..Default::default()
        };
        let (r, _) = ReportLogic::build(&mut pool, &cfg, &query).unwrap();
        assert_eq!(r.summary.total_records, 1);
        assert_eq!(r.by_shift.get("Morning").map(|b| b.count), Some(1));
    }

    #[test]
    fn invalid_period_is_rejected() {
        let mut pool = seeded();
        let query = ReportQuery {
            period: Some("2024-13"),
            ..Default::default()
        };
        assert!(ReportLogic::build(&mut pool, &Config::default(), &query).is_err());
    }

    #[test]
    fn text_rendering_lists_people_with_assignments() {
        let mut pool = seeded();
        set_assignment(&pool.conn, "John", AssignmentField::Group, Some("North")).unwrap();
        let cfg = Config::default();

        let (report, assignments) =
            ReportLogic::build(&mut pool, &cfg, &ReportQuery::default()).unwrap();
        let text = strip_ansi(&ReportLogic::render_text(&report, &assignments, &cfg));

        assert!(text.contains("Records      : 4 (1 impounded, 25.00%)"));
        assert!(text.contains("Revenue      : R 165.00"));
        assert!(text.contains("Top performer: John (2 records)"));
        assert!(text.contains("DANGER"));
        assert!(text.lines().any(|l| l.starts_with("John") && l.contains("North")));
        assert!(text.contains("2024-06-01"));
    }

    #[test]
    fn json_rendering_is_camel_case() {
        let mut pool = seeded();
        let (report, _) =
            ReportLogic::build(&mut pool, &Config::default(), &ReportQuery::default()).unwrap();
        let json = ReportLogic::render_json(&report).unwrap();
        assert!(json.contains("\"impoundedRate\": 25.0"));
        assert!(json.contains("\"byPerson\""));
    }
}
