//! Place name and coordinate extraction from full Google Maps URLs.
//!
//! Both extractors are pure and total: a URL that matches nothing, or matches
//! with a value that cannot be decoded, yields `None`.

use std::borrow::Cow;
use std::sync::LazyLock;

use atlas_core::Coordinates;
use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};

static PLACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/place/([^/?#]+)").expect("valid place regex"));
static SEARCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/search/([^/@?#]+)").expect("valid search regex"));

/// Which URL encoding supplied a coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSource {
    /// `!8m2!3d<lat>!4d<lng>`: the place marker.
    PlaceMarker,
    /// `!3d<lat>!4d<lng>` without the marker prefix.
    Embedded,
    /// `ll=<lat>,<lng>` query parameter.
    LlParam,
    /// `q=<lat>,<lng>` query parameter holding only a coordinate pair.
    QParam,
    /// `@<lat>,<lng>`: where the map is centred, not necessarily the place.
    Viewport,
}

impl CoordinateSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlaceMarker => "place_marker",
            Self::Embedded => "embedded",
            Self::LlParam => "ll_param",
            Self::QParam => "q_param",
            Self::Viewport => "viewport",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Occurrence {
    First,
    /// Multi-stop URLs list the main destination last.
    Last,
}

struct CoordinatePattern {
    source: CoordinateSource,
    regex: Regex,
    occurrence: Occurrence,
}

impl CoordinatePattern {
    fn new(source: CoordinateSource, pattern: &str, occurrence: Occurrence) -> Self {
        Self {
            source,
            regex: Regex::new(pattern).expect("valid coordinate regex"),
            occurrence,
        }
    }

    fn candidate(&self, url: &str) -> Option<Coordinates> {
        let caps = match self.occurrence {
            Occurrence::First => self.regex.captures(url),
            Occurrence::Last => self.regex.captures_iter(url).last(),
        }?;
        coordinates_from(&caps)
    }
}

/// Evaluated in order; the first pattern yielding an in-range pair wins.
static COORDINATE_PATTERNS: LazyLock<[CoordinatePattern; 5]> = LazyLock::new(|| {
    [
        CoordinatePattern::new(
            CoordinateSource::PlaceMarker,
            r"!8m2!3d(-?\d+\.\d+)!4d(-?\d+\.\d+)",
            Occurrence::Last,
        ),
        CoordinatePattern::new(
            CoordinateSource::Embedded,
            r"!3d(-?\d+\.\d+)!4d(-?\d+\.\d+)",
            Occurrence::Last,
        ),
        CoordinatePattern::new(
            CoordinateSource::LlParam,
            r"[?&]ll=(-?\d+\.\d+),(-?\d+\.\d+)",
            Occurrence::First,
        ),
        CoordinatePattern::new(
            CoordinateSource::QParam,
            r"[?&]q=(-?\d+\.\d+),(-?\d+\.\d+)(?:[&#]|$)",
            Occurrence::First,
        ),
        CoordinatePattern::new(
            CoordinateSource::Viewport,
            r"@(-?\d+\.\d+),(-?\d+\.\d+)",
            Occurrence::First,
        ),
    ]
});

/// Extracts the place or search term from a full Maps URL.
///
/// `/place/<name>` takes precedence over `/search/<term>`. `+` is read as a
/// space, then percent-escapes are decoded. A malformed escape or invalid
/// UTF-8 makes the whole extraction `None`.
#[must_use]
pub fn extract_name(url: &str) -> Option<String> {
    let raw = PLACE_RE
        .captures(url)
        .or_else(|| SEARCH_RE.captures(url))?
        .get(1)?
        .as_str();
    decode_component(raw)
}

/// Extracts the coordinates that best represent the linked place.
#[must_use]
pub fn extract_coordinates(url: &str) -> Option<Coordinates> {
    extract_coordinates_with_source(url).map(|(coordinates, _)| coordinates)
}

/// Like [`extract_coordinates`], also reporting which encoding matched.
///
/// A pattern whose match is out of range is skipped like a pattern that did
/// not match, and evaluation continues with the next one.
#[must_use]
pub fn extract_coordinates_with_source(url: &str) -> Option<(Coordinates, CoordinateSource)> {
    COORDINATE_PATTERNS.iter().find_map(|pattern| {
        let coordinates = pattern.candidate(url)?;
        tracing::trace!(source = pattern.source.as_str(), "coordinates matched");
        Some((coordinates, pattern.source))
    })
}

fn coordinates_from(caps: &Captures<'_>) -> Option<Coordinates> {
    let lat = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let lng = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Coordinates::new(lat, lng)
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    if has_malformed_escape(&spaced) {
        return None;
    }
    percent_decode_str(&spaced)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}

/// `true` when a `%` is not followed by two hex digits.
fn has_malformed_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
