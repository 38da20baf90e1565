//! Fatal errors that end a run without a report.
//!
//! Per-row check failures are not errors: they are recorded as
//! [`CheckStatus`](crate::types::CheckStatus) values and the batch continues.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("access token not configured")]
    CredentialMissing,

    #[error("failed to read input: {0:#}")]
    Input(anyhow::Error),

    #[error("failed to write report: {0:#}")]
    Render(anyhow::Error),

    #[error("unexpected error: {0:#}")]
    Unexpected(#[from] anyhow::Error),
}
