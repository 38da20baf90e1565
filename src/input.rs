//! CSV input reader.
//!
//! Columns are looked up by header name (`Name`, `Number`, `Phone Code`),
//! so column order does not matter and extra columns are ignored.

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::RunError;
use crate::types::InputRow;

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Number")]
    number: String,
    #[serde(rename = "Phone Code")]
    phone_code: String,
}

/// Opens `path` and returns its rows in file order.
///
/// Rows are decoded lazily; a malformed row yields an `Err` item at its
/// position and the caller is expected to abort the run.
pub fn read_rows(path: &Path) -> Result<impl Iterator<Item = Result<InputRow>>, RunError> {
    if !path.exists() {
        return Err(RunError::InputNotFound(path.to_path_buf()));
    }

    let reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))
        .map_err(RunError::Input)?;

    debug!(path = %path.display(), "Reading input rows");

    Ok(reader
        .into_deserialize::<RawRow>()
        .enumerate()
        .map(|(i, record)| {
            // header is line 1
            let line = i + 2;
            let raw = record.with_context(|| format!("Malformed input row at line {line}"))?;
            into_input_row(raw, line)
        }))
}

fn into_input_row(raw: RawRow, line: usize) -> Result<InputRow> {
    let provider_id = raw.phone_code.trim().to_string();
    if provider_id.is_empty() {
        bail!("Empty 'Phone Code' at line {line}");
    }

    Ok(InputRow {
        name: raw.name.trim().to_string(),
        display_number: raw.number.trim().to_string(),
        provider_id,
    })
}
