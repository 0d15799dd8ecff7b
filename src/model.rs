//! Domain check result types
//!
//! Mirrors the JSON returned by `POST /api/check-domain`. Decoding is
//! lenient about missing optional fields and ignores keys the checker
//! does not use (`domain`, `dkim.record`, the per-record `status`
//! fields other than SPF's).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A DMARC disposition policy (`p=` / `sp=` tag value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DmarcPolicy {
    /// Monitoring only; failing mail is delivered normally.
    None,
    Quarantine,
    Reject,
}

impl DmarcPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Quarantine => "quarantine",
            Self::Reject => "reject",
        }
    }

    /// Whether failing mail is actually acted upon.
    #[must_use]
    pub const fn is_enforcing(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for DmarcPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn unknown_status() -> String {
    "unknown".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpfResult {
    #[serde(default)]
    pub exists: bool,
    /// Server classification: `strict`, `moderate`, `neutral`,
    /// `found`, `not found` or `unknown`.
    #[serde(default = "unknown_status")]
    pub status: String,
    #[serde(default)]
    pub record: Option<String>,
}

impl Default for SpfResult {
    fn default() -> Self {
        Self {
            exists: false,
            status: unknown_status(),
            record: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DkimResult {
    #[serde(default)]
    pub exists: bool,
    /// The common selector under which a key was found.
    #[serde(default)]
    pub selector: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmarcResult {
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub policy: Option<DmarcPolicy>,
    #[serde(default)]
    pub subdomain_policy: Option<DmarcPolicy>,
    #[serde(default)]
    pub record: Option<String>,
}

impl DmarcResult {
    /// The subdomain policy, but only when it differs from the main one.
    #[must_use]
    pub fn distinct_subdomain_policy(&self) -> Option<DmarcPolicy> {
        self.subdomain_policy.filter(|sp| Some(*sp) != self.policy)
    }

    /// DMARC is published but only in monitoring mode (`p=none`).
    #[must_use]
    pub fn is_monitor_only(&self) -> bool {
        self.exists && self.policy == Some(DmarcPolicy::None)
    }
}

/// Security assessment of a sender domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCheckResult {
    pub spoofable: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub spf: SpfResult,
    #[serde(default)]
    pub dkim: DkimResult,
    #[serde(default)]
    pub dmarc: DmarcResult,
}

/// A result stamped with the domain and time it was obtained.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub domain: String,
    pub checked_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: DomainCheckResult,
}

impl CheckReport {
    #[must_use]
    pub fn new(domain: impl Into<String>, result: DomainCheckResult) -> Self {
        Self {
            domain: domain.into(),
            checked_at: Utc::now(),
            result,
        }
    }
}
