//! Quality lookups against the platform's Graph API.
//!
//! One blocking `GET {base}/{version}/{provider_id}` per identifier; the
//! response is classified into a [`QualityReading`]. Failures of any kind
//! are returned as readings, never as errors, and nothing is retried.

use anyhow::{Result, bail};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::fetch::{ApiKey, BasicClient, HttpClient, json_get};
use crate::types::{CheckStatus, QualityReading};

pub struct QualityChecker<C> {
    client: C,
    base_url: Url,
    api_version: String,
}

impl QualityChecker<ApiKey<BasicClient>> {
    /// Builds a checker that authenticates every request with `token`.
    pub fn from_config(config: &Config, token: &str) -> Result<Self> {
        let client = ApiKey::bearer(BasicClient::new()?, token)?;
        Self::new(client, &config.base_url, &config.api_version)
    }
}

impl<C: HttpClient> QualityChecker<C> {
    pub fn new(client: C, base_url: &str, api_version: &str) -> Result<Self> {
        let base_url: Url = base_url.parse()?;
        if base_url.cannot_be_a_base() {
            bail!("API base URL '{base_url}' cannot carry a path");
        }
        Ok(Self {
            client,
            base_url,
            api_version: api_version.to_string(),
        })
    }

    /// URL queried for `provider_id`; the id is percent-encoded as one segment.
    pub fn endpoint(&self, provider_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&self.api_version)
                .push(provider_id);
        }
        url
    }

    #[tracing::instrument(skip(self))]
    pub fn check(&self, provider_id: &str) -> QualityReading {
        let url = self.endpoint(provider_id);
        debug!(%url, "Requesting quality rating");

        let response = match self.client.execute(json_get(url)) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Quality request failed");
                return connection_error(e);
            }
        };

        let status = response.status().as_u16();
        if status != 200 {
            let reading = classify_status(status);
            warn!(status, label = %reading.quality_label, "Quality request rejected");
            return reading;
        }

        match response.text() {
            Ok(body) => classify_body(&body),
            Err(e) => {
                warn!(error = %e, "Failed to read response body");
                connection_error(e)
            }
        }
    }
}

/// Classifies any non-200 status.
pub fn classify_status(status: u16) -> QualityReading {
    match status {
        404 => QualityReading::failure(CheckStatus::NotFound, "identifier not found"),
        401 => QualityReading::failure(
            CheckStatus::AuthError,
            "authentication failed - invalid credential",
        ),
        400 => QualityReading::failure(CheckStatus::BadRequest, "invalid request"),
        other => QualityReading::failure(CheckStatus::ApiError, format!("API error {other}")),
    }
}

/// Classifies the body of a 200 response.
pub fn classify_body(body: &str) -> QualityReading {
    let payload: Value = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Response body is not JSON");
            return QualityReading::failure(
                CheckStatus::ConnectionError,
                format!("connection error: invalid JSON body: {e}"),
            );
        }
    };

    let raw = match payload.get("quality_rating") {
        Some(Value::String(raw)) => raw.clone(),
        Some(other) => other.to_string(),
        None => return QualityReading::no_quality_info(payload),
    };

    debug!(rating = %raw, "Quality rating received");
    QualityReading::rated(raw, payload)
}

/// The label carries the full source chain, e.g.
/// `error sending request for url (..): ...: Connection refused`.
fn connection_error(err: reqwest::Error) -> QualityReading {
    QualityReading::failure(
        CheckStatus::ConnectionError,
        format!("connection error: {:#}", anyhow::Error::new(err)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QualityTier;

    fn checker(base: &str) -> QualityChecker<BasicClient> {
        QualityChecker::new(BasicClient::new().unwrap(), base, "v23.0").unwrap()
    }

    #[test]
    fn test_status_table() {
        let cases = [
            (404, CheckStatus::NotFound, "identifier not found"),
            (401, CheckStatus::AuthError, "authentication failed - invalid credential"),
            (400, CheckStatus::BadRequest, "invalid request"),
            (500, CheckStatus::ApiError, "API error 500"),
            (429, CheckStatus::ApiError, "API error 429"),
        ];
        for (code, status, label) in cases {
            let reading = classify_status(code);
            assert_eq!(reading.status, status, "status {code}");
            assert_eq!(reading.quality_label, label);
            assert_eq!(reading.tier, None);
            assert!(reading.raw_payload.is_none());
        }
    }

    #[test]
    fn test_body_with_rating() {
        let reading = classify_body(r#"{"id":"1","quality_rating":"YELLOW"}"#);
        assert_eq!(reading.status, CheckStatus::Success);
        assert_eq!(reading.tier, Some(QualityTier::Medium));
        assert_eq!(reading.quality_label, "medium");
        assert_eq!(reading.quality_raw.as_deref(), Some("YELLOW"));
        assert!(reading.raw_payload.is_some());
    }

    #[test]
    fn test_body_without_rating() {
        let reading = classify_body(r#"{"id":"1"}"#);
        assert_eq!(reading.status, CheckStatus::NoQualityInfo);
        assert_eq!(reading.quality_label, "no information available");
        assert!(reading.raw_payload.is_some());
    }

    #[test]
    fn test_body_with_non_string_rating_is_unknown() {
        let reading = classify_body(r#"{"quality_rating":null}"#);
        assert_eq!(reading.status, CheckStatus::Success);
        assert_eq!(reading.quality_label, "unknown");
        assert_eq!(reading.quality_raw.as_deref(), Some("null"));
    }

    #[test]
    fn test_invalid_json_is_connection_error() {
        let reading = classify_body("<html>");
        assert_eq!(reading.status, CheckStatus::ConnectionError);
        assert!(reading.quality_label.starts_with("connection error:"));
    }

    #[test]
    fn test_endpoint_encodes_identifier() {
        let c = checker("https://graph.example.com/");
        assert_eq!(
            c.endpoint("123456").as_str(),
            "https://graph.example.com/v23.0/123456"
        );
        assert_eq!(
            c.endpoint("a/b").as_str(),
            "https://graph.example.com/v23.0/a%2Fb"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(QualityChecker::new(BasicClient::new().unwrap(), "mailto:x@y.z", "v1").is_err());
        assert!(QualityChecker::new(BasicClient::new().unwrap(), "not a url", "v1").is_err());
    }
}
