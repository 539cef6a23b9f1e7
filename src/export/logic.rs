use crate::config::Config;
use crate::core::analytics::buckets::Buckets;
use crate::core::analytics::report::AnalyticsReport;
use crate::core::report::{ReportLogic, ReportQuery};
use crate::db::log::wlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::load_records;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{
    BUCKET_HEADERS, PERSON_HEADERS, RECORD_HEADERS, person_rows, record_rows,
};
use crate::export::xlsx::{SheetData, XCell, export_xlsx};
use crate::models::assignment::Assignments;
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use std::path::Path;

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub format: ExportFormat,
    /// Absolute path of the output file
    pub file: &'a str,
    /// `None`, `"all"` or `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and `A:B` ranges
    pub period: Option<&'a str>,
    pub upload: Option<i64>,
    /// Export the aggregated report instead of the flattened records
    pub report: bool,
    pub force: bool,
}

/// High level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Returns false when there was nothing to export.
    pub fn export(pool: &mut DbPool, cfg: &Config, req: &ExportRequest) -> AppResult<bool> {
        let path = Path::new(req.file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {}",
                req.file
            )));
        }

        ensure_writable(path, req.force)?;

        let written = if req.report {
            Self::export_report(pool, cfg, req, path)?
        } else {
            Self::export_records(pool, req, path)?
        };

        if written {
            wlog_quiet(
                &pool.conn,
                "export",
                req.file,
                &format!(
                    "Exported {} as {}",
                    if req.report { "report" } else { "records" },
                    req.format.as_str()
                ),
            );
        }

        Ok(written)
    }

    fn export_records(pool: &mut DbPool, req: &ExportRequest, path: &Path) -> AppResult<bool> {
        let bounds = match req.period {
            Some(p) => parse_period(p)?,
            None => None,
        };

        let stored: Vec<_> = load_records(pool, req.upload)?
            .into_iter()
            .filter(|s| ReportLogic::in_period(&s.record, bounds))
            .collect();

        if stored.is_empty() {
            warning("No records found for the selected period.");
            return Ok(false);
        }

        let rows = record_rows(&stored);

        match req.format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => {
                let mut sheet = SheetData::new("Records", &RECORD_HEADERS);
                for r in &rows {
                    sheet.rows.push(vec![
                        r.id.into(),
                        r.upload.into(),
                        r.person.as_str().into(),
                        XCell::Day(r.day.clone()),
                        (if r.impounded { "yes" } else { "no" }).into(),
                        XCell::Money(r.revenue),
                    ]);
                }
                export_xlsx(&[sheet], path)?
            }
        }

        Ok(true)
    }

    fn export_report(
        pool: &mut DbPool,
        cfg: &Config,
        req: &ExportRequest,
        path: &Path,
    ) -> AppResult<bool> {
        let query = ReportQuery {
            period: req.period,
            upload: req.upload,
            shift_strategy: None,
        };
        let (report, assignments) = ReportLogic::build(pool, cfg, &query)?;

        if report.is_empty() {
            warning("No records found for the selected period.");
            return Ok(false);
        }

        match req.format {
            ExportFormat::Json => export_json(&report, path)?,
            ExportFormat::Csv => export_csv(&person_rows(&report, &assignments), path)?,
            ExportFormat::Xlsx => export_xlsx(&report_sheets(&report, &assignments), path)?,
        }

        Ok(true)
    }
}

fn bucket_sheet(name: &str, buckets: &Buckets) -> SheetData {
    let mut sheet = SheetData::new(name, &BUCKET_HEADERS);
    for b in buckets.iter() {
        sheet.rows.push(vec![
            b.key.as_str().into(),
            b.count.into(),
            b.impounded_count.into(),
            XCell::Money(b.revenue),
        ]);
    }
    sheet
}

/// People, Groups, Shifts, Trend and Alerts worksheets.
fn report_sheets(report: &AnalyticsReport, assignments: &Assignments) -> Vec<SheetData> {
    let mut people = SheetData::new("People", &PERSON_HEADERS);
    for p in person_rows(report, assignments) {
        people.rows.push(vec![
            p.person.into(),
            p.group.into(),
            p.shift.into(),
            p.records.into(),
            p.impounded.into(),
            XCell::Money(p.revenue),
        ]);
    }

    let mut trend = SheetData::new("Trend", &["day", "records", "impounded", "impound rate"]);
    for t in &report.trend {
        let rate = if t.total_count == 0 {
            0.0
        } else {
            t.impounded_count as f64 / t.total_count as f64 * 100.0
        };
        trend.rows.push(vec![
            XCell::Day(t.day.clone()),
            t.total_count.into(),
            t.impounded_count.into(),
            XCell::Percent(rate),
        ]);
    }

    let mut alerts = SheetData::new("Alerts", &["severity", "kind", "message"]);
    for a in &report.alerts {
        let kind = serde_json::to_value(a.kind)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        alerts.rows.push(vec![
            a.severity.as_str().into(),
            kind.into(),
            a.message.as_str().into(),
        ]);
    }

    vec![
        people,
        bucket_sheet("Groups", &report.by_group),
        bucket_sheet("Shifts", &report.by_shift),
        trend,
        alerts,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::insert_upload;
    use crate::models::record::TransactionRecord;
    use std::fs;
    use std::path::PathBuf;

    fn out_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("weighlog-export-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    fn seeded() -> DbPool {
        let mut pool = DbPool::in_memory().unwrap();
        let rec = |p: &str, d: &str, imp: bool| TransactionRecord {
            person: Some(p.into()),
            date: Some(d.into()),
            impounded: imp,
            amount_due: Some(40.0.into()),
            ..Default::default()
        };
        insert_upload(
            &mut pool,
            "x.csv",
            &[
                rec("John", "2024-05-01 08:00", true),
                rec("Jane", "2024-06-01 08:00", false),
            ],
        )
        .unwrap();
        pool
    }

    fn req(file: &str, format: ExportFormat, report: bool) -> ExportRequest<'_> {
        ExportRequest {
            format,
            file,
            period: None,
            upload: None,
            report,
            force: true,
        }
    }

    #[test]
    fn relative_paths_are_rejected() {
        let mut pool = seeded();
        let r = ExportLogic::export(&mut pool, &Config::default(), &req("out.csv", ExportFormat::Csv, false));
        assert!(matches!(r, Err(AppError::Export(_))));
    }

    #[test]
    fn records_csv_with_period() {
        let mut pool = seeded();
        let path = out_path("records.csv");
        let file = path.to_string_lossy().to_string();
        let mut request = req(&file, ExportFormat::Csv, false);
        request.period = Some("2024-05");

        assert!(ExportLogic::export(&mut pool, &Config::default(), &request).unwrap());

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("id,upload,person,day,impounded,revenue"));
        assert_eq!(lines.next(), Some("1,1,John,2024-05-01,true,40.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_selection_writes_nothing() {
        let mut pool = seeded();
        let path = out_path("nothing.json");
        let file = path.to_string_lossy().to_string();
        let _ = fs::remove_file(&path);
        let mut request = req(&file, ExportFormat::Json, true);
        request.period = Some("2020");

        assert!(!ExportLogic::export(&mut pool, &Config::default(), &request).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn report_json_and_xlsx() {
        let mut pool = seeded();

        let json_path = out_path("report.json");
        let file = json_path.to_string_lossy().to_string();
        ExportLogic::export(&mut pool, &Config::default(), &req(&file, ExportFormat::Json, true))
            .unwrap();
        let back: AnalyticsReport =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(back.summary.total_records, 2);
        assert_eq!(back.summary.impounded_rate, 50.0);

        let xlsx_path = out_path("report.xlsx");
        let file = xlsx_path.to_string_lossy().to_string();
        ExportLogic::export(&mut pool, &Config::default(), &req(&file, ExportFormat::Xlsx, true))
            .unwrap();
        assert!(xlsx_path.exists());
    }

    #[test]
    fn report_sheets_are_named() {
        let report = AnalyticsReport::default();
        let names: Vec<String> = report_sheets(&report, &Assignments::default())
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["People", "Groups", "Shifts", "Trend", "Alerts"]);
    }
}
