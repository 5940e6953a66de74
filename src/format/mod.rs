//! Output formatters
//!
//! Provides trait-based output formatting for geocoding results.

pub mod json;
pub mod links;
pub mod text;

use crate::config::Config;
use crate::error::Result;
use crate::geo::GeocodingResult;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a list of geocoding results
    fn format(&self, results: &[GeocodingResult], config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "text" => Some(Box::new(text::TextFormatter)),
        "json" => Some(Box::new(json::JsonFormatter)),
        "links" => Some(Box::new(links::LinksFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable result list".to_string(),
        },
        FormatInfo {
            name: "json".to_string(),
            description: "Full JSON results".to_string(),
        },
        FormatInfo {
            name: "links".to_string(),
            description: "Map links in the configured style".to_string(),
        },
    ]
}
