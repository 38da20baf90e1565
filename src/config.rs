//! Run configuration loaded from an env-style file.
//!
//! Values are read with `dotenvy::from_filename_iter` so the process
//! environment is never mutated; keys missing from the file fall back to
//! environment variables, then to defaults.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::RunError;

pub const TOKEN_KEY: &str = "GRAPH_ACCESS_TOKEN";
pub const TOKEN_PLACEHOLDER: &str = "your_access_token_here";

pub const DEFAULT_BASE_URL: &str = "https://graph.example.com";
pub const DEFAULT_API_VERSION: &str = "v23.0";
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_LOG_FILE: &str = "logs/quality_rater.log";

/// The platform access token, or why there is none.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Missing,
    Placeholder,
    Token(String),
}

impl Credential {
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Credential::Missing,
            Some(TOKEN_PLACEHOLDER) => Credential::Placeholder,
            Some(token) => Credential::Token(token.to_string()),
        }
    }

    /// Returns the token, failing for both the absent and placeholder cases.
    pub fn require(&self) -> Result<&str, RunError> {
        match self {
            Credential::Token(token) => Ok(token.as_str()),
            Credential::Missing | Credential::Placeholder => Err(RunError::CredentialMissing),
        }
    }
}

// Never print the token itself.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Missing => f.write_str("Missing"),
            Credential::Placeholder => f.write_str("Placeholder"),
            Credential::Token(_) => f.write_str("Token(<redacted>)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credential: Credential,
    pub base_url: String,
    pub api_version: String,
    pub request_delay: Duration,
    pub log_file_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credential: Credential::Missing,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            request_delay: DEFAULT_REQUEST_DELAY,
            log_file_path: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Config {
    /// Loads the config from `path`, falling back to the process environment.
    ///
    /// A missing file is not an error; a present but unparsable file is.
    pub fn load(path: &Path) -> Result<Self> {
        let file_values = if path.exists() {
            read_env_file(path)?
        } else {
            debug!(path = %path.display(), "Config file not found, using environment only");
            HashMap::new()
        };

        Ok(Self::from_lookup(|key| {
            file_values
                .get(key)
                .cloned()
                .or_else(|| std::env::var(key).ok())
        }))
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let request_delay = match lookup("REQUEST_DELAY_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    warn!(value = %raw, "Invalid REQUEST_DELAY_MS, using default");
                    defaults.request_delay
                }
            },
            None => defaults.request_delay,
        };

        Self {
            credential: Credential::from_value(lookup(TOKEN_KEY).as_deref()),
            base_url: non_empty(lookup("GRAPH_API_BASE_URL"))
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            api_version: non_empty(lookup("GRAPH_API_VERSION")).unwrap_or(defaults.api_version),
            request_delay,
            log_file_path: non_empty(lookup("LOG_FILE_PATH")).unwrap_or(defaults.log_file_path),
        }
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let iter = dotenvy::from_filename_iter(path)
        .with_context(|| format!("Failed to open config file {}", path.display()))?;

    let mut values = HashMap::new();
    for item in iter {
        let (key, value) =
            item.with_context(|| format!("Failed to parse config file {}", path.display()))?;
        values.insert(key, value);
    }
    Ok(values)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_placeholder_token_is_not_configured() {
        let config = Config::from_lookup(lookup_from(&[(TOKEN_KEY, TOKEN_PLACEHOLDER)]));
        assert_eq!(config.credential, Credential::Placeholder);
        assert!(matches!(
            config.credential.require(),
            Err(RunError::CredentialMissing)
        ));
    }

    #[test]
    fn test_empty_and_absent_token_are_missing() {
        assert_eq!(Credential::from_value(None), Credential::Missing);
        assert_eq!(Credential::from_value(Some("   ")), Credential::Missing);
    }

    #[test]
    fn test_real_token_is_returned() {
        let credential = Credential::from_value(Some(" abc123 "));
        assert_eq!(credential.require().unwrap(), "abc123");
        assert_eq!(format!("{credential:?}"), "Token(<redacted>)");
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.request_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_overrides_and_bad_delay() {
        let config = Config::from_lookup(lookup_from(&[
            ("GRAPH_API_BASE_URL", "http://localhost:9000/"),
            ("GRAPH_API_VERSION", "v1.0"),
            ("REQUEST_DELAY_MS", "soon"),
        ]));
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.api_version, "v1.0");
        assert_eq!(config.request_delay, DEFAULT_REQUEST_DELAY);
    }

    #[test]
    fn test_load_reads_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# credentials").unwrap();
        writeln!(file, "GRAPH_ACCESS_TOKEN=from_file_token").unwrap();
        writeln!(file, "REQUEST_DELAY_MS=0").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.credential.require().unwrap(), "from_file_token");
        assert_eq!(config.request_delay, Duration::ZERO);
    }
}
