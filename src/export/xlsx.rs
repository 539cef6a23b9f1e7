use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use crate::utils::date::parse_date;
use crate::utils::excel_date::to_excel_serial;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// A typed worksheet cell.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum XCell {
    Text(String),
    Number(f64),
    Money(f64),
    Percent(f64),
    /// `YYYY-MM-DD` day key; written as an Excel date when it parses.
    Day(String),
}

impl XCell {
    fn display_width(&self) -> usize {
        match self {
            XCell::Text(s) | XCell::Day(s) => UnicodeWidthStr::width(s.as_str()),
            XCell::Number(n) => n.to_string().len(),
            XCell::Money(n) => format!("{n:.2}").len() + 2,
            XCell::Percent(n) => format!("{n:.2}").len() + 1,
        }
    }
}

impl From<&str> for XCell {
    fn from(s: &str) -> Self {
        XCell::Text(s.to_string())
    }
}

impl From<String> for XCell {
    fn from(s: String) -> Self {
        XCell::Text(s)
    }
}

impl From<u64> for XCell {
    fn from(n: u64) -> Self {
        XCell::Number(n as f64)
    }
}

impl From<i64> for XCell {
    fn from(n: i64) -> Self {
        XCell::Number(n as f64)
    }
}

pub(crate) struct SheetData {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<XCell>>,
}

impl SheetData {
    pub fn new(name: &str, headers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Export XLSX with styling and auto column widths, one worksheet per sheet.
pub(crate) fn export_xlsx(sheets: &[SheetData], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        write_sheet(worksheet, sheet)?;
    }

    workbook.save(path)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &SheetData) -> AppResult<()> {
    // ---------------------------
    // Empty dataset
    // ---------------------------
    if sheet.rows.is_empty() {
        worksheet.write(0, 0, "No data available")?;
        return Ok(());
    }

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, header.as_str(), &header_format)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    let mut col_widths: Vec<usize> = sheet
        .headers
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, cells) in sheet.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, cell) in cells.iter().enumerate() {
            write_cell(worksheet, row, col as u16, cell, band_color)?;

            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(cell.display_width());
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    Ok(())
}

fn base_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &XCell, bg: Color) -> AppResult<()> {
    match cell {
        XCell::Day(s) => match parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)) {
            Some(dt) => {
                let fmt = base_format(bg).set_num_format("yyyy-mm-dd");
                worksheet.write_with_format(row, col, to_excel_serial(&dt), &fmt)?;
            }
            None => {
                worksheet.write_with_format(row, col, s.as_str(), &base_format(bg))?;
            }
        },
        XCell::Number(n) => {
            let fmt = base_format(bg).set_align(FormatAlign::Right);
            worksheet.write_with_format(row, col, *n, &fmt)?;
        }
        XCell::Money(n) => {
            let fmt = base_format(bg)
                .set_align(FormatAlign::Right)
                .set_num_format("#,##0.00");
            worksheet.write_with_format(row, col, *n, &fmt)?;
        }
        XCell::Percent(n) => {
            let fmt = base_format(bg)
                .set_align(FormatAlign::Right)
                .set_num_format("0.00%");
            worksheet.write_with_format(row, col, *n / 100.0, &fmt)?;
        }
        XCell::Text(s) => {
            worksheet.write_with_format(row, col, s.as_str(), &base_format(bg))?;
        }
    }
    Ok(())
}
