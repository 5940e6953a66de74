//! Property writer
//!
//! Turns a geocoding result into the set of frontmatter key/value pairs to
//! merge into a note. Produces a diff only; merging into the note is the
//! caller's job.

pub mod config;

pub use config::{PropertiesConfig, PropertySetting};

use crate::geo::GeocodingResult;
use crate::link::{make_map_link, LinkStyle};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Logical property keys a result can be written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKey {
    Address,
    Lat,
    Lng,
    /// Coordinates as a `[lat, lng]` string pair
    Location,
    /// External map link in the configured style
    MapLink,
    /// A `[](geo:lat,lng)` link
    MapViewLink,
}

impl PropertyKey {
    /// All keys, in insertion order
    pub fn all() -> [PropertyKey; 6] {
        [
            Self::Address,
            Self::Lat,
            Self::Lng,
            Self::Location,
            Self::MapLink,
            Self::MapViewLink,
        ]
    }

    /// The key's canonical name (also the default output key)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Lat => "lat",
            Self::Lng => "lng",
            Self::Location => "location",
            Self::MapLink => "map_link",
            Self::MapViewLink => "map_view_link",
        }
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PropertyKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        PropertyKey::all()
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown property key: {}", s))
    }
}

/// Build the frontmatter entries a result should produce
///
/// Only enabled properties appear. When `override_existing` is false, an
/// output key already present in `existing` is left untouched (absent from
/// the returned diff).
pub fn build_properties(
    result: &GeocodingResult,
    config: &PropertiesConfig,
    override_existing: bool,
    existing: &serde_json::Map<String, Value>,
    link_style: LinkStyle,
) -> serde_json::Map<String, Value> {
    let mut entries = serde_json::Map::new();

    for key in PropertyKey::all() {
        let setting = config.setting(key);
        if !setting.enabled {
            continue;
        }
        if !override_existing && existing.contains_key(&setting.output_key) {
            continue;
        }

        let value = match key {
            PropertyKey::Address => Value::String(result.address.clone()),
            PropertyKey::Lat => Value::from(result.lat),
            PropertyKey::Lng => Value::from(result.lng),
            PropertyKey::Location => Value::Array(vec![
                Value::String(result.lat.to_string()),
                Value::String(result.lng.to_string()),
            ]),
            PropertyKey::MapLink => Value::String(make_map_link(result, link_style)),
            PropertyKey::MapViewLink => {
                Value::String(format!("[](geo:{},{})", result.lat, result.lng))
            }
        };

        entries.insert(setting.output_key.clone(), value);
    }

    entries
}
