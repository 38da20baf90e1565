//! Excel report for a finished batch.
//!
//! Tabs, in order: Full Data, Summary, one tab per populated quality tier,
//! Errors (only when some check failed), Metadata.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::stats::{CategoryCounts, NO_DATA};
use crate::types::{CheckResult, GRAY_FILL, QualityTier};

pub const FULL_DATA_SHEET: &str = "Full Data";
pub const SUMMARY_SHEET: &str = "Summary";
pub const ERRORS_SHEET: &str = "Errors";
pub const METADATA_SHEET: &str = "Metadata";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `quality_report_<YYYYMMDD>_<HHMMSS>.xlsx`
pub fn default_report_name(now: NaiveDateTime) -> PathBuf {
    PathBuf::from(format!("quality_report_{}.xlsx", now.format("%Y%m%d_%H%M%S")))
}

/// Writes the report to `output`, or to a timestamped file in the working
/// directory, and returns the path written.
pub fn write_report(results: &[CheckResult], output: Option<&Path>) -> Result<PathBuf> {
    let now = Local::now().naive_local();
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_report_name(now));

    write_report_at(results, &path, now)?;
    Ok(path)
}

/// Writes the report with an explicit generation time.
pub fn write_report_at(results: &[CheckResult], path: &Path, generated_at: NaiveDateTime) -> Result<()> {
    let mut workbook = build_workbook(results, generated_at)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    info!(path = %path.display(), rows = results.len(), "Quality report written");
    Ok(())
}

pub fn build_workbook(results: &[CheckResult], generated_at: NaiveDateTime) -> Result<Workbook> {
    let counts = CategoryCounts::from_results(results);
    let mut workbook = Workbook::new();

    create_full_data_sheet(&mut workbook, results)?;
    create_summary_sheet(&mut workbook, &counts)?;

    for tier in QualityTier::ALL {
        let members: Vec<&CheckResult> = results.iter().filter(|r| r.tier == Some(tier)).collect();
        if !members.is_empty() {
            create_listing_sheet(&mut workbook, tier.sheet_name(), "Quality", &members, tier.fill())?;
        }
    }

    let failed: Vec<&CheckResult> = results.iter().filter(|r| !r.status.is_success()).collect();
    if !failed.is_empty() {
        create_listing_sheet(&mut workbook, ERRORS_SHEET, "Error", &failed, GRAY_FILL)?;
    }

    create_metadata_sheet(&mut workbook, &counts, generated_at)?;

    Ok(workbook)
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
}

fn fill_format(color: Color) -> Format {
    Format::new().set_background_color(color)
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    Ok(())
}

fn create_full_data_sheet(workbook: &mut Workbook, results: &[CheckResult]) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(FULL_DATA_SHEET)?;

    write_headers(
        sheet,
        &["Name", "Number", "Phone Code", "Status", "Quality", "Checked At"],
    )?;

    for (i, r) in results.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &r.name)?;
        sheet.write_string(row, 1, &r.display_number)?;
        sheet.write_string(row, 2, &r.provider_id)?;
        sheet.write_string(row, 3, r.status.code())?;
        sheet.write_string_with_format(row, 4, &r.quality_label, &fill_format(r.fill()))?;
        sheet.write_string(row, 5, r.checked_at.format(TIMESTAMP_FORMAT).to_string())?;
    }

    sheet.autofit();
    Ok(())
}

fn create_summary_sheet(workbook: &mut Workbook, counts: &CategoryCounts) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(SUMMARY_SHEET)?;

    write_headers(sheet, &["Category", "Count", "Percentage"])?;

    let mut rows: Vec<(&str, usize)> = QualityTier::ALL
        .iter()
        .map(|t| (t.summary_label(), counts.tier(*t)))
        .collect();
    rows.push(("Errors", counts.errors));

    let mut row = 1u32;
    for (label, count) in rows {
        sheet.write_string(row, 0, label)?;
        sheet.write_number(row, 1, count as f64)?;
        sheet.write_string(row, 2, counts.format_pct(count))?;
        row += 1;
    }

    let bold = Format::new().set_bold();
    sheet.write_string_with_format(row, 0, "Total", &bold)?;
    sheet.write_number_with_format(row, 1, counts.total as f64, &bold)?;
    let total_pct = if counts.is_empty() { NO_DATA } else { "100%" };
    sheet.write_string_with_format(row, 2, total_pct, &bold)?;

    sheet.autofit();
    Ok(())
}

/// Name / Number / Phone Code / label listing with the label column filled.
fn create_listing_sheet(
    workbook: &mut Workbook,
    name: &str,
    label_header: &str,
    results: &[&CheckResult],
    fill: Color,
) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;

    write_headers(sheet, &["Name", "Number", "Phone Code", label_header])?;

    let label_format = fill_format(fill);
    for (i, r) in results.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &r.name)?;
        sheet.write_string(row, 1, &r.display_number)?;
        sheet.write_string(row, 2, &r.provider_id)?;
        sheet.write_string_with_format(row, 3, &r.quality_label, &label_format)?;
    }

    sheet.autofit();
    Ok(())
}

fn create_metadata_sheet(
    workbook: &mut Workbook,
    counts: &CategoryCounts,
    generated_at: NaiveDateTime,
) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(METADATA_SHEET)?;

    write_headers(sheet, &["Field", "Value"])?;

    sheet.write_string(1, 0, "Generated At")?;
    sheet.write_string(1, 1, generated_at.format(TIMESTAMP_FORMAT).to_string())?;

    sheet.write_string(2, 0, "Total Analyzed")?;
    sheet.write_number(2, 1, counts.total as f64)?;

    sheet.write_string(3, 0, "Successful")?;
    sheet.write_number(3, 1, counts.successful as f64)?;

    sheet.write_string(4, 0, "Errors")?;
    sheet.write_number(4, 1, (counts.total - counts.successful) as f64)?;

    sheet.write_string(5, 0, "Success Rate")?;
    sheet.write_string(5, 1, counts.success_rate())?;

    sheet.autofit();
    Ok(())
}
