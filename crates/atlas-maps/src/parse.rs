//! Entry point that turns any Google Maps link into a [`ParsedLocation`].

use std::sync::Arc;
use std::time::Duration;

use atlas_core::{AppConfig, ParsedLocation};

use crate::country::extract_country;
use crate::error::ExpandError;
use crate::expand::{UnconfiguredExpander, UrlExpander};
use crate::extract::{extract_coordinates, extract_name};
use crate::validate::is_short_form;

/// Parses Google Maps links, expanding short links through a [`UrlExpander`].
///
/// Parsing never fails: every miss or expansion error degrades to a result
/// with absent fields. Calls are independent; overlapping calls may complete
/// in any order and callers discard stale results themselves.
///
/// Each expansion is bounded by a wall-clock budget regardless of how the
/// expander paces its own requests.
#[derive(Clone)]
pub struct MapsParser {
    expander: Arc<dyn UrlExpander>,
    expand_budget: Duration,
}

impl MapsParser {
    pub const DEFAULT_EXPAND_BUDGET: Duration = Duration::from_millis(5_000);

    #[must_use]
    pub fn new(expander: Arc<dyn UrlExpander>) -> Self {
        Self {
            expander,
            expand_budget: Self::DEFAULT_EXPAND_BUDGET,
        }
    }

    /// Uses `expand_timeout_ms` as the expansion budget.
    #[must_use]
    pub fn from_config(expander: Arc<dyn UrlExpander>, config: &AppConfig) -> Self {
        Self::new(expander).with_expand_budget(Duration::from_millis(config.expand_timeout_ms))
    }

    #[must_use]
    pub fn with_expand_budget(mut self, budget: Duration) -> Self {
        self.expand_budget = budget;
        self
    }

    #[must_use]
    pub fn expand_budget(&self) -> Duration {
        self.expand_budget
    }

    /// A parser that never expands short links.
    #[must_use]
    pub fn offline() -> Self {
        Self::new(Arc::new(UnconfiguredExpander))
    }

    /// Extracts name, coordinates and country, expanding short links when the
    /// link itself carries nothing.
    ///
    /// - Something found directly: returned with both flags `false`.
    /// - Short link expanded: extraction re-runs on the full URL, `expanded = true`.
    /// - Short link not expanded: all fields absent, `is_short_url = true`.
    /// - Otherwise: all fields absent, both flags `false`.
    pub async fn parse(&self, url: &str) -> ParsedLocation {
        if let Some(found) = extract_location(url) {
            return found;
        }

        if !is_short_form(url) {
            return ParsedLocation::default();
        }

        match self.expand_within_budget(url).await {
            Ok(expanded_url) => {
                tracing::debug!(short_url = url, expanded_url = %expanded_url, "short link expanded");
                extract_location(&expanded_url)
                    .unwrap_or_default()
                    .into_expanded()
            }
            Err(ExpandError::NotConfigured) => {
                tracing::debug!(short_url = url, "no expansion endpoint; returning short link hint");
                ParsedLocation::short_url_hint()
            }
            Err(e) => {
                tracing::warn!(short_url = url, error = %e, "short link expansion failed");
                ParsedLocation::short_url_hint()
            }
        }
    }

    async fn expand_within_budget(&self, url: &str) -> Result<String, ExpandError> {
        tokio::time::timeout(self.expand_budget, self.expander.expand(url))
            .await
            .unwrap_or(Err(ExpandError::Timeout))
    }

    /// Direct extraction only, without touching the network. Short links come
    /// back with all fields absent and both flags `false`.
    #[must_use]
    pub fn parse_offline(url: &str) -> ParsedLocation {
        extract_location(url).unwrap_or_default()
    }
}

impl std::fmt::Debug for MapsParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsParser")
            .field("expand_budget", &self.expand_budget)
            .finish_non_exhaustive()
    }
}

/// `None` when neither a name nor coordinates could be extracted.
fn extract_location(url: &str) -> Option<ParsedLocation> {
    let name = extract_name(url);
    let coordinates = extract_coordinates(url);
    if name.is_none() && coordinates.is_none() {
        return None;
    }

    let country = name.as_deref().and_then(extract_country);
    Some(ParsedLocation::from_parts(name, coordinates, country))
}
