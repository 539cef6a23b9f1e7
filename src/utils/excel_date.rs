//! Conversions between chrono date-times and Excel serial numbers.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Last serial Excel accepts (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.0;

fn excel_epoch() -> NaiveDateTime {
    // 1899-12-30 absorbs Excel's phantom 1900-02-29
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

pub fn to_excel_serial(dt: &NaiveDateTime) -> f64 {
    let duration = *dt - excel_epoch();

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    days + secs / 86400.0
}

/// Serial number (days since the Excel epoch, fraction = time of day).
/// Returns None for values outside Excel's date range.
pub fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(1.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }

    let days = serial.trunc() as i64;
    let secs = ((serial - serial.trunc()) * 86400.0).round() as i64;

    excel_epoch()
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(secs))
}
