//! External map link derivation
//!
//! Builds a provider-appropriate map URL for a geocoding result. Pure
//! string construction; every parameter value is URL-encoded.

use crate::geo::{ApiProvider, GeocodingResult};
use serde::{Deserialize, Serialize};

/// Target style for a derived map link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStyle {
    /// Google Maps
    Google,
    /// Apple Maps
    Apple,
    /// OpenStreetMap
    Osm,
}

impl std::fmt::Display for LinkStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::Apple => write!(f, "apple"),
            Self::Osm => write!(f, "osm"),
        }
    }
}

impl std::str::FromStr for LinkStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "apple" => Ok(Self::Apple),
            "osm" | "openstreetmap" => Ok(Self::Osm),
            _ => Err(format!("Unknown map link style: {}", s)),
        }
    }
}

/// List all available link styles
pub fn available_styles() -> Vec<LinkStyle> {
    vec![LinkStyle::Google, LinkStyle::Apple, LinkStyle::Osm]
}

/// Derive an external map link for a result
pub fn make_map_link(result: &GeocodingResult, style: LinkStyle) -> String {
    match style {
        LinkStyle::Google => make_google_link(result),
        LinkStyle::Apple => make_apple_link(result),
        LinkStyle::Osm => make_osm_link(result),
    }
}

/// Google Maps link
///
/// A Google-sourced result has a canonical place id, which gives an exact
/// place link. Results from the other provider fall back to a lat/lng
/// query, the more precise of the options available.
fn make_google_link(result: &GeocodingResult) -> String {
    if result.provider == ApiProvider::GoogleGeocoding {
        return format!(
            "https://www.google.com/maps/search/?api=1&query=Google&query_place_id={}",
            urlencoding::encode(&result.id)
        );
    }

    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        urlencoding::encode(&format!("{},{}", result.lat, result.lng))
    )
}

/// Apple Maps link; the address parameter is display-only
fn make_apple_link(result: &GeocodingResult) -> String {
    format!(
        "https://maps.apple.com/?ll={}&address={}",
        urlencoding::encode(&format!("{},{}", result.lat, result.lng)),
        urlencoding::encode(&result.address)
    )
}

/// OpenStreetMap link centered on the point with a marker
fn make_osm_link(result: &GeocodingResult) -> String {
    format!(
        "https://openstreetmap.org/?mlat={}&mlon={}",
        urlencoding::encode(&result.lat.to_string()),
        urlencoding::encode(&result.lng.to_string())
    )
}
