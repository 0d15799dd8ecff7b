//! Checker configuration

use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

/// Default location of the security-evaluation service.
pub const DEFAULT_URL: &str = "http://127.0.0.1:5000";

/// Quiet period before a debounced check actually runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Upper bound on a single check request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the domain checker and its HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Base URL of the service exposing `/api/check-domain`.
    pub base_url: String,
    /// A request still pending after this long is treated as failed.
    pub request_timeout: Duration,
    pub debounce: Duration,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl CheckerConfig {
    /// Load checker configuration from environment variables
    ///
    /// Reads from `.env` file if present. All variables are optional:
    /// - `SPOOFCHECK_URL` (default: `http://127.0.0.1:5000`)
    /// - `SPOOFCHECK_TIMEOUT_SECS` (default: `5`)
    /// - `SPOOFCHECK_DEBOUNCE_MS` (default: `500`)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("SPOOFCHECK_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_URL.to_string());

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "SPOOFCHECK_URL must be an http(s) URL, got '{base_url}'"
            )));
        }

        let request_timeout = match lookup("SPOOFCHECK_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .map_err(|e| Error::Config(format!("Invalid SPOOFCHECK_TIMEOUT_SECS: {e}")))?,
            ),
            None => DEFAULT_TIMEOUT,
        };

        let debounce = match lookup("SPOOFCHECK_DEBOUNCE_MS") {
            Some(raw) => Duration::from_millis(
                raw.parse()
                    .map_err(|e| Error::Config(format!("Invalid SPOOFCHECK_DEBOUNCE_MS: {e}")))?,
            ),
            None => DEFAULT_DEBOUNCE,
        };

        Ok(Self {
            base_url,
            request_timeout,
            debounce,
        })
    }

    /// Full URL of the domain check endpoint.
    #[must_use]
    pub fn check_url(&self) -> String {
        format!("{}/api/check-domain", self.base_url)
    }
}
