//! Allow-list check for user-supplied Google Maps links.
//!
//! Hosts are compared for exact equality. Suffix or substring matching would
//! accept `google.com.evil.com` and similar lookalikes.

use atlas_core::ValidationResult;
use reqwest::Url;

const SHORT_LINK_HOST: &str = "maps.app.goo.gl";
const LEGACY_SHORT_HOST: &str = "goo.gl";
const MAPS_PATH_PREFIX: &str = "/maps";

/// Classifies `input` as an acceptable Google Maps link.
///
/// Every rejection carries the same user-facing message.
#[must_use]
pub fn validate_maps_url(input: &str) -> ValidationResult {
    if is_allowed_maps_url(input) {
        ValidationResult::ok()
    } else {
        ValidationResult::invalid()
    }
}

/// [`validate_maps_url`] for callers holding an optional value; `None` is rejected.
#[must_use]
pub fn validate_optional_maps_url(input: Option<&str>) -> ValidationResult {
    input.map_or_else(ValidationResult::invalid, validate_maps_url)
}

/// `true` for `maps.app.goo.gl/*` and `goo.gl/maps*` links, which carry no
/// place data until their redirects are followed.
#[must_use]
pub fn is_short_form(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    match parsed.host_str() {
        Some(SHORT_LINK_HOST) => true,
        Some(LEGACY_SHORT_HOST) => parsed.path().starts_with(MAPS_PATH_PREFIX),
        _ => false,
    }
}

fn is_allowed_maps_url(input: &str) -> bool {
    if input.trim().is_empty() {
        return false;
    }

    let Ok(url) = Url::parse(input) else {
        return false;
    };

    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    let path = url.path();
    match url.host_str() {
        Some("google.com" | "www.google.com" | LEGACY_SHORT_HOST) => {
            path.starts_with(MAPS_PATH_PREFIX)
        }
        Some("maps.google.com" | SHORT_LINK_HOST) => true,
        _ => false,
    }
}
