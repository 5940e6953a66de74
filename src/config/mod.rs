//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/placemark/config.toml

pub mod defaults;

use crate::constants::geo::{DEFAULT_REFERENCE_LAT, DEFAULT_REFERENCE_LNG};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::ApiProvider;
use crate::link::LinkStyle;
use crate::props::{PropertiesConfig, PropertyKey};
use crate::rank::RankingMode;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Which properties are written, under which keys
    #[serde(default)]
    pub properties: PropertiesConfig,

    /// Insert behavior
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Geocoding API selection
    #[serde(default)]
    pub api: ApiConfig,

    /// Map link settings
    #[serde(default)]
    pub links: LinksConfig,

    /// Place ranking defaults
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Insert behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Whether to override existing frontmatter keys with the same name
    #[serde(default)]
    pub override_existing_properties: bool,
}

/// Geocoding API selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Which provider backend to use
    #[serde(default = "default_api_provider")]
    pub provider: ApiProvider,

    /// API key passed through to the provider
    #[serde(default)]
    pub key: String,
}

/// Map link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Style for the map_link property
    #[serde(default = "default_map_link_style")]
    pub map_link: LinkStyle,
}

/// Place ranking defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Fallback reference latitude
    #[serde(default = "default_reference_lat")]
    pub default_lat: f64,

    /// Fallback reference longitude
    #[serde(default = "default_reference_lng")]
    pub default_lng: f64,

    /// Radius filter in kilometers; zero disables filtering
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,

    /// Default sort mode
    #[serde(default = "default_sort")]
    pub default_sort: RankingMode,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_api_provider() -> ApiProvider {
    DEFAULT_API_PROVIDER
}
fn default_map_link_style() -> LinkStyle {
    DEFAULT_MAP_LINK_STYLE
}
fn default_reference_lat() -> f64 {
    DEFAULT_REFERENCE_LAT
}
fn default_reference_lng() -> f64 {
    DEFAULT_REFERENCE_LNG
}
fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}
fn default_sort() -> RankingMode {
    DEFAULT_SORT
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            provider: default_api_provider(),
            key: String::new(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            map_link: default_map_link_style(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_lat: default_reference_lat(),
            default_lng: default_reference_lng(),
            default_radius_km: default_radius_km(),
            default_sort: default_sort(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// The configured fallback reference point for distance ranking
    pub fn default_reference(&self) -> Coordinates {
        Coordinates::new(self.ranking.default_lat, self.ranking.default_lng)
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key" (properties use "properties.<name>.<field>").
    /// Returns the value as a string, or None if not found.
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["behavior", "override_existing_properties"] => {
                Some(self.behavior.override_existing_properties.to_string())
            }

            ["api", "provider"] => Some(self.api.provider.to_string()),
            ["api", "key"] => Some(self.api.key.clone()),

            ["links", "map_link"] => Some(self.links.map_link.to_string()),

            ["ranking", "default_lat"] => Some(self.ranking.default_lat.to_string()),
            ["ranking", "default_lng"] => Some(self.ranking.default_lng.to_string()),
            ["ranking", "default_radius_km"] => {
                Some(self.ranking.default_radius_km.to_string())
            }
            ["ranking", "default_sort"] => Some(self.ranking.default_sort.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["properties", name, field] => {
                let key = PropertyKey::from_str(name).ok()?;
                let setting = self.properties.setting(key);
                match *field {
                    "output_key" => Some(setting.output_key.clone()),
                    "enabled" => Some(setting.enabled.to_string()),
                    _ => None,
                }
            }

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["behavior", "override_existing_properties"] => {
                self.behavior.override_existing_properties = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid boolean value: {}", value)))?;
            }

            ["api", "provider"] => {
                self.api.provider = value.parse().map_err(Error::Config)?;
            }
            ["api", "key"] => {
                self.api.key = value.to_string();
            }

            ["links", "map_link"] => {
                self.links.map_link = value.parse().map_err(Error::Config)?;
            }

            ["ranking", "default_lat"] => {
                self.ranking.default_lat = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid latitude value: {}", value)))?;
            }
            ["ranking", "default_lng"] => {
                self.ranking.default_lng = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid longitude value: {}", value)))?;
            }
            ["ranking", "default_radius_km"] => {
                self.ranking.default_radius_km = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid radius value: {}", value)))?;
            }
            ["ranking", "default_sort"] => {
                self.ranking.default_sort = value.parse().map_err(Error::Config)?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            ["properties", name, field] => {
                let property = PropertyKey::from_str(name).map_err(Error::Config)?;
                let setting = self.properties.setting_mut(property);
                match *field {
                    "output_key" => {
                        if value.is_empty() {
                            return Err(Error::Config(
                                "Output key cannot be empty".to_string(),
                            ));
                        }
                        setting.output_key = value.to_string();
                    }
                    "enabled" => {
                        setting.enabled = value.parse().map_err(|_| {
                            Error::Config(format!("Invalid boolean value: {}", value))
                        })?;
                    }
                    _ => {
                        return Err(Error::Config(format!("Unknown config key: {}", key)));
                    }
                }
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<String> {
        let mut keys = vec![
            "behavior.override_existing_properties".to_string(),
            "api.provider".to_string(),
            "api.key".to_string(),
            "links.map_link".to_string(),
            "ranking.default_lat".to_string(),
            "ranking.default_lng".to_string(),
            "ranking.default_radius_km".to_string(),
            "ranking.default_sort".to_string(),
            "server.host".to_string(),
            "server.port".to_string(),
        ];

        for key in PropertyKey::all() {
            keys.push(format!("properties.{}.output_key", key));
            keys.push(format!("properties.{}.enabled", key));
        }

        keys
    }
}
