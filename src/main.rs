//! CLI entry point for the quality rater.
//!
//! Reads identifiers from a CSV file, checks each one's quality rating
//! against the Graph API and writes an Excel report.

use clap::Parser;
use quality_rater::config::Config;
use quality_rater::error::RunError;
use quality_rater::{console, driver, logging};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

const CONFIG_FILE: &str = "config.env";

#[derive(Parser)]
#[command(name = "quality_rater")]
#[command(about = "Check messaging number quality ratings and write an Excel report", long_about = None)]
struct Cli {
    /// CSV file with Name, Number and Phone Code columns
    #[arg(value_name = "INPUT", default_value = "numbers.csv")]
    input: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = Path::new(CONFIG_FILE);

    let config = match Config::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            console::print_fatal(&format!("Failed to load {CONFIG_FILE}: {e:#}"));
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = logging::init(&config.log_file_path);

    console::print_banner();

    match driver::run(&config, &cli.input, None) {
        Ok(summary) => {
            info!(path = %summary.path.display(), total = summary.counts.total, "Run complete");
            ExitCode::SUCCESS
        }
        Err(RunError::CredentialMissing) => {
            error!("Access token not configured");
            console::print_credential_help(config_path);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "Run aborted");
            console::print_fatal(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
