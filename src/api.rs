//! Security-evaluation service client

use crate::config::CheckerConfig;
use crate::error::{Error, Result};
use crate::model::DomainCheckResult;
use serde::Serialize;
use std::future::Future;
use tracing::{debug, info};

/// Something that can assess a sender domain.
pub trait DomainCheckApi: Send + Sync + 'static {
    /// Ask for the security assessment of `domain`.
    fn check_domain(&self, domain: &str) -> impl Future<Output = Result<DomainCheckResult>> + Send;
}

#[derive(Serialize)]
struct CheckRequest<'a> {
    domain: &'a str,
}

/// HTTP client for `POST /api/check-domain`
#[derive(Debug, Clone)]
pub struct HttpCheckApi {
    client: reqwest::Client,
    url: String,
}

impl HttpCheckApi {
    /// Build a client for the service described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &CheckerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Http(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.check_url(),
        })
    }

    /// The endpoint this client posts to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DomainCheckApi for HttpCheckApi {
    async fn check_domain(&self, domain: &str) -> Result<DomainCheckResult> {
        debug!("Checking domain {} via {}", domain, self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&CheckRequest { domain })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let result: DomainCheckResult =
            serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))?;

        info!("Domain {} checked: spoofable={}", domain, result.spoofable);
        Ok(result)
    }
}
