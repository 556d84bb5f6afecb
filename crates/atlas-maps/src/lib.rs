//! Google Maps link handling: validation, extraction of place name,
//! coordinates and country, and expansion of short links.

pub mod country;
pub mod error;
pub mod expand;
pub mod extract;
pub mod parse;
pub mod redirect;
pub mod validate;

pub use country::{extract_country, lookup_country_code};
pub use error::ExpandError;
pub use expand::{EdgeExpander, UnconfiguredExpander, UrlExpander};
pub use extract::{
    extract_coordinates, extract_coordinates_with_source, extract_name, CoordinateSource,
};
pub use parse::MapsParser;
pub use redirect::RedirectResolver;
pub use validate::{is_short_form, validate_maps_url, validate_optional_maps_url};
