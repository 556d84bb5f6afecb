//! Server side of the short-link expansion protocol: follows the redirect
//! chain of a short link by hand and reports the first URL answering 200.

use std::time::Duration;

use async_trait::async_trait;
use atlas_core::AppConfig;
use reqwest::{header::LOCATION, redirect::Policy, Client, StatusCode, Url};

use crate::error::ExpandError;
use crate::expand::UrlExpander;
use crate::validate::is_short_form;

#[derive(Debug)]
pub struct RedirectResolver {
    client: Client,
    /// Maximum number of requests issued for one link.
    max_hops: usize,
}

impl RedirectResolver {
    pub const DEFAULT_MAX_HOPS: usize = 10;
    pub const DEFAULT_USER_AGENT: &'static str = "Mozilla/5.0 (compatible; URL Expander)";

    /// Creates a resolver with automatic redirects disabled.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, max_hops: usize) -> Result<Self, ExpandError> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, max_hops })
    }

    /// # Errors
    ///
    /// Propagates errors from [`RedirectResolver::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ExpandError> {
        Self::new(
            config.redirect_timeout_secs,
            &config.redirect_user_agent,
            config.redirect_max_hops,
        )
    }

    /// Follows redirects from `start_url` until a 200 response.
    ///
    /// Relative `Location` values are resolved against the URL that returned them.
    ///
    /// # Errors
    ///
    /// - [`ExpandError::InvalidLocation`] if `start_url` or a `Location` value
    ///   cannot be parsed.
    /// - [`ExpandError::MissingLocation`] for a 3xx response without `Location`.
    /// - [`ExpandError::UnexpectedStatus`] for any status other than 3xx or 200.
    /// - [`ExpandError::TooManyRedirects`] when the hop budget runs out.
    /// - [`ExpandError::Timeout`] / [`ExpandError::Http`] on transport failure.
    pub async fn resolve(&self, start_url: &str) -> Result<String, ExpandError> {
        let mut current = Url::parse(start_url).map_err(|e| ExpandError::InvalidLocation {
            location: start_url.to_string(),
            reason: e.to_string(),
        })?;

        for hop in 0..self.max_hops {
            let response = self
                .client
                .get(current.clone())
                .send()
                .await
                .map_err(ExpandError::transport)?;
            let status = response.status();

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| ExpandError::MissingLocation {
                        status: status.as_u16(),
                        url: current.to_string(),
                    })?;

                let next = current
                    .join(location)
                    .map_err(|e| ExpandError::InvalidLocation {
                        location: location.to_string(),
                        reason: e.to_string(),
                    })?;

                tracing::debug!(hop, status = status.as_u16(), next = %next, "following redirect");
                current = next;
                continue;
            }

            if status == StatusCode::OK {
                return Ok(current.into());
            }

            return Err(ExpandError::UnexpectedStatus {
                status: status.as_u16(),
                url: current.into(),
            });
        }

        Err(ExpandError::TooManyRedirects {
            max_hops: self.max_hops,
        })
    }
}

#[async_trait]
impl UrlExpander for RedirectResolver {
    /// Only short links are followed; anything else is refused without a request.
    async fn expand(&self, short_url: &str) -> Result<String, ExpandError> {
        if !is_short_form(short_url) {
            return Err(ExpandError::NotShortUrl {
                url: short_url.to_string(),
            });
        }
        self.resolve(short_url).await
    }
}
