//! Batch driver: credential check, input, per-row checks, summary, report.

use anyhow::Result;
use chrono::{Local, NaiveDateTime, Timelike};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, info_span};

use crate::checker::QualityChecker;
use crate::config::Config;
use crate::console;
use crate::error::RunError;
use crate::fetch::HttpClient;
use crate::input::read_rows;
use crate::report::write_report;
use crate::stats::CategoryCounts;
use crate::types::{CheckResult, InputRow};

/// What a successful run produced.
#[derive(Debug)]
pub struct ReportSummary {
    pub path: PathBuf,
    pub counts: CategoryCounts,
}

/// Runs a full batch with the checker described by `config`.
///
/// Fails before any network call when the credential is absent or still the
/// placeholder, or when the input file is missing or malformed.
pub fn run(config: &Config, input: &Path, output: Option<&Path>) -> Result<ReportSummary, RunError> {
    let token = config.credential.require()?;
    let checker = QualityChecker::from_config(config, token)?;
    run_with_checker(&checker, input, output, config.request_delay)
}

/// Runs a full batch with an already-built checker, pausing `delay` after
/// every row.
pub fn run_with_checker<C: HttpClient>(
    checker: &QualityChecker<C>,
    input: &Path,
    output: Option<&Path>,
    delay: Duration,
) -> Result<ReportSummary, RunError> {
    let rows: Vec<InputRow> = read_rows(input)?
        .collect::<Result<_>>()
        .map_err(RunError::Input)?;

    info!(input = %input.display(), rows = rows.len(), "Input loaded");

    let mut results = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let index = i + 1;
        let _span = info_span!("check_row", index, provider_id = %row.provider_id).entered();

        console::print_progress(index, &row);
        let reading = checker.check(&row.provider_id);
        let result = CheckResult::new(row, reading, now_to_second());
        console::print_outcome(&result);

        debug!(status = result.status.code(), label = %result.quality_label, "Row checked");
        results.push(result);

        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    let counts = CategoryCounts::from_results(&results);
    info!(
        total = counts.total,
        good = counts.good,
        medium = counts.medium,
        bad = counts.bad,
        errors = counts.errors,
        "Batch finished"
    );
    console::print_summary(&results, &counts);

    console::print_generating_report();
    let path = write_report(&results, output).map_err(RunError::Render)?;
    console::print_report_saved(&path);

    Ok(ReportSummary { path, counts })
}

fn now_to_second() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
