use serde::Serialize;

use crate::forms::{validate_required, FieldCheck};
use crate::location::ParsedLocation;
use crate::sanitize::sanitize_for_storage;

/// Row written to the external `suggestions` table when a visitor suggests a place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionDraft {
    pub location_name: String,
    pub google_maps_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reason: String,
    pub country_code: Option<String>,
}

impl SuggestionDraft {
    /// Combines a parse result with the fields the visitor typed.
    ///
    /// A non-blank `typed_name` overrides the parsed name. Free text is passed
    /// through [`sanitize_for_storage`]. `google_maps_url` is expected to have
    /// been validated by the caller; blank values are dropped.
    #[must_use]
    pub fn from_parsed(
        parsed: &ParsedLocation,
        google_maps_url: Option<&str>,
        typed_name: Option<&str>,
        reason: &str,
    ) -> Self {
        let name = typed_name
            .filter(|n| !n.trim().is_empty())
            .or(parsed.name.as_deref());

        Self {
            location_name: sanitize_for_storage(name),
            google_maps_url: google_maps_url
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(ToOwned::to_owned),
            latitude: parsed.lat,
            longitude: parsed.lng,
            reason: sanitize_for_storage(Some(reason)),
            country_code: parsed.country_code.clone(),
        }
    }

    /// Checks the fields the submission form marks as required.
    #[must_use]
    pub fn validate(&self) -> FieldCheck {
        let name = validate_required(&self.location_name, "Location name");
        if !name.valid {
            return name;
        }
        validate_required(&self.reason, "Reason")
    }
}
