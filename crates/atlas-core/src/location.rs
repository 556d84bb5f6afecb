//! Value types produced by the Google Maps link pipeline.

use serde::{Deserialize, Serialize};

/// The single user-facing message for every rejected link.
pub const INVALID_MAPS_URL_MESSAGE: &str = "Please enter a valid Google Maps URL";

/// A latitude/longitude pair known to be within the valid ranges
/// (`lat` in `[-90, 90]`, `lng` in `[-180, 180]`, both inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    /// Returns `None` when either value is out of range or not finite.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let lat_ok = (-90.0..=90.0).contains(&lat);
        let lng_ok = (-180.0..=180.0).contains(&lng);
        (lat_ok && lng_ok).then_some(Self { lat, lng })
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// A country name found at the end of a place name, with its ISO code when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryMatch {
    pub country: String,
    pub country_code: Option<String>,
}

/// Result of parsing one Google Maps link.
///
/// `lat` and `lng` are either both present or both absent. `is_short_url`
/// and `expanded` are never both `true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLocation {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub is_short_url: bool,
    pub expanded: bool,
}

impl ParsedLocation {
    /// Assembles a result from the individual extraction outcomes.
    #[must_use]
    pub fn from_parts(
        name: Option<String>,
        coordinates: Option<Coordinates>,
        country: Option<CountryMatch>,
    ) -> Self {
        let (country, country_code) = match country {
            Some(m) => (Some(m.country), m.country_code),
            None => (None, None),
        };
        Self {
            name,
            lat: coordinates.map(|c| c.lat()),
            lng: coordinates.map(|c| c.lng()),
            country,
            country_code,
            is_short_url: false,
            expanded: false,
        }
    }

    /// The all-absent result for a recognized short link that could not be expanded.
    #[must_use]
    pub fn short_url_hint() -> Self {
        Self {
            is_short_url: true,
            ..Self::default()
        }
    }

    /// Marks the result as produced from an expanded short link.
    #[must_use]
    pub fn into_expanded(self) -> Self {
        Self {
            is_short_url: false,
            expanded: true,
            ..self
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::new(self.lat?, self.lng?)
    }

    /// `true` when no name, coordinates or country were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.lat.is_none()
            && self.lng.is_none()
            && self.country.is_none()
            && self.country_code.is_none()
    }
}

/// Outcome of link validation. There is no partial validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    #[must_use]
    pub fn invalid() -> Self {
        Self {
            valid: false,
            error: Some(INVALID_MAPS_URL_MESSAGE.to_string()),
        }
    }
}
