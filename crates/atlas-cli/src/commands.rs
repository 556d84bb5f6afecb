//! Command handlers for the CLI.
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use std::sync::Arc;

use anyhow::Context;
use atlas_core::{
    sanitize_for_storage_with_limit, sanitize_user_content, username_from_email, validate_email,
    validate_password, AppConfig, FieldCheck, ParsedLocation, SuggestionDraft,
};
use atlas_maps::{
    is_short_form, validate_maps_url, EdgeExpander, MapsParser, RedirectResolver, UrlExpander,
};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}

/// Picks the configured remote expansion endpoint, falling back to following
/// redirects from this process.
pub(crate) fn build_expander(config: &AppConfig) -> anyhow::Result<Arc<dyn UrlExpander>> {
    if let Some(edge) = EdgeExpander::from_config(config)? {
        tracing::debug!(endpoint = %edge.endpoint(), "using remote expansion endpoint");
        return Ok(Arc::new(edge));
    }
    tracing::debug!("no expansion endpoint configured; following redirects locally");
    Ok(Arc::new(RedirectResolver::from_config(config)?))
}

async fn parse_location(url: &str, offline: bool) -> anyhow::Result<ParsedLocation> {
    if offline {
        return Ok(MapsParser::parse_offline(url));
    }
    let config = atlas_core::load_app_config()?;
    let parser = MapsParser::from_config(build_expander(&config)?, &config);
    Ok(parser.parse(url).await)
}

/// # Errors
///
/// Returns an error when the link is rejected, after printing the result.
pub(crate) fn run_validate(url: &str) -> anyhow::Result<()> {
    let result = validate_maps_url(url);
    print_json(&result)?;
    if let Some(message) = result.error {
        anyhow::bail!(message);
    }
    Ok(())
}

pub(crate) async fn run_parse(url: &str, offline: bool) -> anyhow::Result<()> {
    let parsed = parse_location(url, offline).await?;
    if parsed.is_short_url {
        tracing::warn!(url, "short link could not be expanded; no place data available");
    }
    print_json(&parsed)
}

/// # Errors
///
/// Returns an error if `url` is not a short link, configuration cannot be
/// loaded, or expansion fails.
pub(crate) async fn run_expand(url: &str) -> anyhow::Result<()> {
    if !is_short_form(url) {
        anyhow::bail!("not a maps.app.goo.gl or goo.gl/maps link: {url}");
    }
    let config = atlas_core::load_app_config()?;
    let expanded = build_expander(&config)?
        .expand(url)
        .await
        .with_context(|| format!("failed to expand {url}"))?;
    println!("{expanded}");
    Ok(())
}

#[must_use]
pub(crate) fn sanitize_text(text: &str, max_length: usize, display: bool) -> String {
    if display {
        sanitize_user_content(Some(text))
    } else {
        sanitize_for_storage_with_limit(Some(text), max_length)
    }
}

/// Validates the link and assembles a suggestion draft from its parse result.
///
/// # Errors
///
/// Returns an error when the link is invalid or a required field is empty.
pub(crate) fn build_draft(
    url: &str,
    parsed: &ParsedLocation,
    reason: &str,
    name: Option<&str>,
) -> anyhow::Result<SuggestionDraft> {
    let link = validate_maps_url(url);
    if let Some(message) = link.error {
        anyhow::bail!(message);
    }

    let draft = SuggestionDraft::from_parsed(parsed, Some(url), name, reason);
    let check = draft.validate();
    if let Some(message) = check.message.filter(|_| !check.valid) {
        anyhow::bail!(message);
    }
    Ok(draft)
}

pub(crate) async fn run_draft(
    url: &str,
    reason: &str,
    name: Option<&str>,
    offline: bool,
) -> anyhow::Result<()> {
    let parsed = if validate_maps_url(url).valid {
        parse_location(url, offline).await?
    } else {
        ParsedLocation::default()
    };
    let draft = build_draft(url, &parsed, reason, name)?;
    print_json(&draft)
}

#[derive(Debug, Serialize)]
pub(crate) struct SignupReport {
    pub email: FieldCheck,
    pub password: FieldCheck,
    pub username: String,
}

impl SignupReport {
    /// First failing message, email before password.
    fn first_error(&self) -> Option<&str> {
        [&self.email, &self.password]
            .into_iter()
            .find(|check| !check.valid)
            .and_then(|check| check.message.as_deref())
    }
}

#[must_use]
pub(crate) fn signup_report(
    email: &str,
    password: Option<&str>,
    min_password_length: usize,
) -> SignupReport {
    SignupReport {
        email: validate_email(email),
        password: validate_password(password, min_password_length),
        username: username_from_email(Some(email.trim())),
    }
}

/// # Errors
///
/// Returns the first failing field message, after printing the report.
pub(crate) fn run_check_signup(
    email: &str,
    password: Option<&str>,
    min_password_length: usize,
) -> anyhow::Result<()> {
    let report = signup_report(email, password, min_password_length);
    print_json(&report)?;
    if let Some(message) = report.first_error() {
        anyhow::bail!(message.to_string());
    }
    Ok(())
}
