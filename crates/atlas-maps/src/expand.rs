//! Client side of the short-link expansion protocol.
//!
//! The expansion service receives `{"url": "<short link>"}` and answers
//! `{"expandedUrl": "<full link>"}` with HTTP 200. Anything else is a failure.

use std::time::Duration;

use async_trait::async_trait;
use atlas_core::AppConfig;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::ExpandError;

/// Resolves a short Google Maps link to the full URL it redirects to.
#[async_trait]
pub trait UrlExpander: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`ExpandError`] when the link cannot be expanded for any reason.
    async fn expand(&self, short_url: &str) -> Result<String, ExpandError>;
}

#[derive(Debug, Serialize)]
struct ExpandRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExpandResponse {
    #[serde(rename = "expandedUrl")]
    expanded_url: Option<String>,
}

/// Calls a remote expansion endpoint with a single bounded POST request.
///
/// No retries: a failed or timed-out call is reported once.
#[derive(Debug, Clone)]
pub struct EdgeExpander {
    client: Client,
    endpoint: Url,
}

impl EdgeExpander {
    pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

    /// # Errors
    ///
    /// - [`ExpandError::InvalidEndpoint`] if `endpoint` is not an absolute URL.
    /// - [`ExpandError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(endpoint: &str, timeout_ms: u64) -> Result<Self, ExpandError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ExpandError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self { client, endpoint })
    }

    /// Builds an expander from the configured endpoint, or `None` when none is set.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`EdgeExpander::new`].
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, ExpandError> {
        config
            .expand_endpoint
            .as_deref()
            .map(|endpoint| Self::new(endpoint, config.expand_timeout_ms))
            .transpose()
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl UrlExpander for EdgeExpander {
    async fn expand(&self, short_url: &str) -> Result<String, ExpandError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ExpandRequest { url: short_url })
            .send()
            .await
            .map_err(ExpandError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExpandError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.text().await.map_err(ExpandError::transport)?;
        let parsed = serde_json::from_str::<ExpandResponse>(&body).map_err(|e| {
            ExpandError::Deserialize {
                context: format!("expansion response from {}", self.endpoint),
                source: e,
            }
        })?;

        parsed
            .expanded_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(ExpandError::EmptyExpansion)
    }
}

/// Stand-in used when no expansion endpoint is configured; every call fails
/// with [`ExpandError::NotConfigured`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredExpander;

#[async_trait]
impl UrlExpander for UnconfiguredExpander {
    async fn expand(&self, _short_url: &str) -> Result<String, ExpandError> {
        Err(ExpandError::NotConfigured)
    }
}
