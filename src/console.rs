//! Human-readable console output for a run.
//!
//! This is the tool's user interface and goes to stdout; diagnostics go
//! through `tracing` instead.

use std::path::Path;

use crate::config::TOKEN_KEY;
use crate::stats::CategoryCounts;
use crate::types::{CheckResult, InputRow, QualityTier};

const RULE_WIDTH: usize = 60;

fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

/// Marker and text for one finished check.
pub fn outcome_line(result: &CheckResult) -> String {
    match (result.status.is_success(), result.tier) {
        (true, Some(tier)) => format!(
            "{} Status: {} ({})",
            tier.marker(),
            result.quality_label,
            result.quality_raw.as_deref().unwrap_or_default()
        ),
        (true, None) => format!(
            "❓ Status: {} ({})",
            result.quality_label,
            result.quality_raw.as_deref().unwrap_or_default()
        ),
        (false, _) => format!("❌ {}", result.quality_label),
    }
}

pub fn print_banner() {
    println!("🔍 MESSAGING NUMBER QUALITY CHECK");
    println!("{}", rule('='));
}

pub fn print_credential_help(config_path: &Path) {
    println!("❌ ERROR: access token not configured!");
    println!(
        "📝 Edit '{}' and set your access token:",
        config_path.display()
    );
    println!("   {TOKEN_KEY}=your_real_token");
}

pub fn print_progress(index: usize, row: &InputRow) {
    println!();
    println!("📱 Checking {index}: {}", row.name);
    println!("   Number: {}", row.display_number);
    println!("   Code: {}", row.provider_id);
}

pub fn print_outcome(result: &CheckResult) {
    println!("   {}", outcome_line(result));
}

pub fn print_summary(results: &[CheckResult], counts: &CategoryCounts) {
    println!();
    println!("{}", rule('='));
    println!("📊 FINAL SUMMARY");
    println!("{}", rule('='));

    for tier in QualityTier::ALL {
        println!("{} {}: {}", tier.marker(), tier.summary_label(), counts.tier(tier));
    }
    println!("❌ Errors: {}", counts.errors);
    println!("📱 Total analyzed: {}", counts.total);

    println!();
    println!("📋 DETAILS BY QUALITY:");
    println!("{}", "-".repeat(40));

    for tier in QualityTier::ALL {
        let members: Vec<_> = results.iter().filter(|r| r.tier == Some(tier)).collect();
        if members.is_empty() {
            continue;
        }
        println!();
        println!("{} {}:", tier.marker(), tier.label());
        for r in members {
            println!("   • {} ({})", r.name, r.display_number);
        }
    }

    let errors = error_lines(results);
    if !errors.is_empty() {
        println!();
        println!("❌ ERRORS FOUND:");
        for line in errors {
            println!("   • {line}");
        }
    }
}

/// `name: label` for every failed check, in input order.
pub fn error_lines(results: &[CheckResult]) -> Vec<String> {
    results
        .iter()
        .filter(|r| !r.status.is_success())
        .map(|r| format!("{}: {}", r.name, r.quality_label))
        .collect()
}

pub fn print_generating_report() {
    println!();
    println!("{}", rule('='));
    println!("📄 GENERATING REPORT...");
    println!("{}", rule('='));
}

pub fn print_report_saved(path: &Path) {
    println!();
    println!("✅ Report saved:");
    println!("   📊 Excel: {}", path.display());
}

pub fn print_fatal(message: &str) {
    println!("❌ {message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CheckStatus, QualityReading};
    use serde_json::json;

    fn result(reading: QualityReading) -> CheckResult {
        let row = InputRow {
            name: "Shop".into(),
            display_number: "+1".into(),
            provider_id: "9".into(),
        };
        let at = chrono::NaiveDate::from_ymd_opt(2026, 10, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        CheckResult::new(row, reading, at)
    }

    #[test]
    fn test_outcome_line_for_each_shape() {
        let good = result(QualityReading::rated("GREEN".into(), json!({})));
        assert_eq!(outcome_line(&good), "🟢 Status: good (GREEN)");

        let unknown = result(QualityReading::rated("BLUE".into(), json!({})));
        assert_eq!(outcome_line(&unknown), "❓ Status: unknown (BLUE)");

        let failed = result(QualityReading::failure(CheckStatus::AuthError, "nope"));
        assert_eq!(outcome_line(&failed), "❌ nope");
    }

    #[test]
    fn test_error_lines_skip_successful_checks() {
        let results = vec![
            result(QualityReading::rated("BLUE".into(), json!({}))),
            result(QualityReading::failure(CheckStatus::NotFound, "identifier not found")),
            result(QualityReading::rated("GREEN".into(), json!({}))),
        ];
        assert_eq!(error_lines(&results), vec!["Shop: identifier not found"]);
    }
}
