//! Property configuration
//!
//! Which logical properties are written, and under which frontmatter keys.

use crate::props::PropertyKey;
use serde::{Deserialize, Serialize};

/// Output key and enabled flag for one logical property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySetting {
    /// Frontmatter key the value is written under
    pub output_key: String,
    /// Whether this property is written at all
    pub enabled: bool,
}

impl PropertySetting {
    fn new(output_key: &str, enabled: bool) -> Self {
        Self {
            output_key: output_key.to_string(),
            enabled,
        }
    }
}

/// Settings for all six logical properties
///
/// Defaults mirror the plugin this grew out of: only `address` enabled,
/// output keys equal to the logical key names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertiesConfig {
    #[serde(default = "default_address")]
    pub address: PropertySetting,
    #[serde(default = "default_lat")]
    pub lat: PropertySetting,
    #[serde(default = "default_lng")]
    pub lng: PropertySetting,
    #[serde(default = "default_location")]
    pub location: PropertySetting,
    #[serde(default = "default_map_link")]
    pub map_link: PropertySetting,
    #[serde(default = "default_map_view_link")]
    pub map_view_link: PropertySetting,
}

fn default_address() -> PropertySetting {
    PropertySetting::new("address", true)
}
fn default_lat() -> PropertySetting {
    PropertySetting::new("lat", false)
}
fn default_lng() -> PropertySetting {
    PropertySetting::new("lng", false)
}
fn default_location() -> PropertySetting {
    PropertySetting::new("location", false)
}
fn default_map_link() -> PropertySetting {
    PropertySetting::new("map_link", false)
}
fn default_map_view_link() -> PropertySetting {
    PropertySetting::new("map_view_link", false)
}

impl Default for PropertiesConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            lat: default_lat(),
            lng: default_lng(),
            location: default_location(),
            map_link: default_map_link(),
            map_view_link: default_map_view_link(),
        }
    }
}

impl PropertiesConfig {
    /// Setting for a logical key
    pub fn setting(&self, key: PropertyKey) -> &PropertySetting {
        match key {
            PropertyKey::Address => &self.address,
            PropertyKey::Lat => &self.lat,
            PropertyKey::Lng => &self.lng,
            PropertyKey::Location => &self.location,
            PropertyKey::MapLink => &self.map_link,
            PropertyKey::MapViewLink => &self.map_view_link,
        }
    }

    /// Mutable setting for a logical key
    pub fn setting_mut(&mut self, key: PropertyKey) -> &mut PropertySetting {
        match key {
            PropertyKey::Address => &mut self.address,
            PropertyKey::Lat => &mut self.lat,
            PropertyKey::Lng => &mut self.lng,
            PropertyKey::Location => &mut self.location,
            PropertyKey::MapLink => &mut self.map_link,
            PropertyKey::MapViewLink => &mut self.map_view_link,
        }
    }
}
