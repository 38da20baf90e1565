//! Records flowing through the pipeline: input rows, quality tiers,
//! check statuses and per-row results.

use chrono::NaiveDateTime;
use rust_xlsxwriter::Color;
use serde::Serialize;

/// Fill used for every result that has no quality tier.
pub const GRAY_FILL: Color = Color::RGB(0xD3D3D3);

/// One record of the input CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    pub name: String,
    pub display_number: String,
    pub provider_id: String,
}

/// Coarse quality category reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QualityTier {
    Good,
    Medium,
    Bad,
}

impl QualityTier {
    /// Display order used by the summary, console and report tabs.
    pub const ALL: [QualityTier; 3] = [QualityTier::Good, QualityTier::Medium, QualityTier::Bad];

    /// Parses the platform's `quality_rating` value. Unknown values yield `None`.
    pub fn from_rating(raw: &str) -> Option<Self> {
        match raw {
            "GREEN" => Some(QualityTier::Good),
            "YELLOW" => Some(QualityTier::Medium),
            "RED" => Some(QualityTier::Bad),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QualityTier::Good => "good",
            QualityTier::Medium => "medium",
            QualityTier::Bad => "bad",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            QualityTier::Good => "🟢",
            QualityTier::Medium => "🟡",
            QualityTier::Bad => "🔴",
        }
    }

    /// Light background used for the tier's cells in the report.
    pub fn fill(self) -> Color {
        match self {
            QualityTier::Good => Color::RGB(0x90EE90),
            QualityTier::Medium => Color::RGB(0xFFFF99),
            QualityTier::Bad => Color::RGB(0xFFB6C1),
        }
    }

    /// Row label on the Summary tab.
    pub fn summary_label(self) -> &'static str {
        match self {
            QualityTier::Good => "Good numbers",
            QualityTier::Medium => "Medium numbers",
            QualityTier::Bad => "Bad numbers",
        }
    }

    /// Name of the per-tier listing tab.
    pub fn sheet_name(self) -> &'static str {
        match self {
            QualityTier::Good => "Good Numbers",
            QualityTier::Medium => "Medium Numbers",
            QualityTier::Bad => "Bad Numbers",
        }
    }
}

/// Outcome class of a single quality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckStatus {
    Success,
    NoQualityInfo,
    NotFound,
    AuthError,
    BadRequest,
    ApiError,
    ConnectionError,
}

impl CheckStatus {
    /// Stable code written to the report's Status column.
    pub fn code(self) -> &'static str {
        match self {
            CheckStatus::Success => "SUCCESS",
            CheckStatus::NoQualityInfo => "NO_QUALITY_INFO",
            CheckStatus::NotFound => "NOT_FOUND",
            CheckStatus::AuthError => "AUTH_ERROR",
            CheckStatus::BadRequest => "BAD_REQUEST",
            CheckStatus::ApiError => "API_ERROR",
            CheckStatus::ConnectionError => "CONNECTION_ERROR",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, CheckStatus::Success)
    }
}

/// Classification of one API response, before the row's identity is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReading {
    pub status: CheckStatus,
    pub quality_raw: Option<String>,
    pub tier: Option<QualityTier>,
    pub quality_label: String,
    pub raw_payload: Option<serde_json::Value>,
}

impl QualityReading {
    /// A 200 response carrying a `quality_rating`.
    pub fn rated(raw: String, payload: serde_json::Value) -> Self {
        let tier = QualityTier::from_rating(&raw);
        Self {
            status: CheckStatus::Success,
            quality_label: tier.map_or("unknown", QualityTier::label).to_string(),
            quality_raw: Some(raw),
            tier,
            raw_payload: Some(payload),
        }
    }

    /// A 200 response without a `quality_rating`.
    pub fn no_quality_info(payload: serde_json::Value) -> Self {
        Self {
            raw_payload: Some(payload),
            ..Self::failure(CheckStatus::NoQualityInfo, "no information available")
        }
    }

    /// Any outcome that carries neither a rating nor a payload.
    pub fn failure(status: CheckStatus, label: impl Into<String>) -> Self {
        Self {
            status,
            quality_raw: None,
            tier: None,
            quality_label: label.into(),
            raw_payload: None,
        }
    }
}

/// The final per-row record consumed by the aggregator, console and report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub quality_raw: Option<String>,
    pub tier: Option<QualityTier>,
    pub quality_label: String,
    pub raw_payload: Option<serde_json::Value>,
    pub name: String,
    pub display_number: String,
    pub provider_id: String,
    pub checked_at: NaiveDateTime,
}

impl CheckResult {
    pub fn new(row: InputRow, reading: QualityReading, checked_at: NaiveDateTime) -> Self {
        Self {
            status: reading.status,
            quality_raw: reading.quality_raw,
            tier: reading.tier,
            quality_label: reading.quality_label,
            raw_payload: reading.raw_payload,
            name: row.name,
            display_number: row.display_number,
            provider_id: row.provider_id,
            checked_at,
        }
    }

    /// Background for this result's label cell.
    pub fn fill(&self) -> Color {
        self.tier.map_or(GRAY_FILL, QualityTier::fill)
    }
}
