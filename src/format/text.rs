//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::GeocodingResult;

/// Text formatter - one numbered line per result
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable result list"
    }

    fn format(&self, results: &[GeocodingResult], _config: &Config) -> Result<String> {
        let mut output = String::new();

        for (index, result) in results.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} ({}, {})\n",
                index + 1,
                result.address,
                result.lat,
                result.lng
            ));
            if let Some(info) = &result.info {
                output.push_str(&format!("   {}\n", info));
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::ApiProvider;

    fn test_results() -> Vec<GeocodingResult> {
        vec![GeocodingResult {
            address: "10 Downing Street, London".to_string(),
            lat: 51.5034,
            lng: -0.1276,
            info: Some("building government".to_string()),
            id: "42".to_string(),
            provider: ApiProvider::FreeGeocodingApi,
        }]
    }

    #[test]
    fn test_text_format() {
        let formatter = TextFormatter;
        let output = formatter
            .format(&test_results(), &Config::default())
            .unwrap();

        assert!(output.contains("1. 10 Downing Street, London (51.5034, -0.1276)"));
        assert!(output.contains("building government"));
    }

    #[test]
    fn test_text_format_empty() {
        let formatter = TextFormatter;
        let output = formatter.format(&[], &Config::default()).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_text_formatter_info() {
        let formatter = TextFormatter;
        assert_eq!(formatter.name(), "text");
        assert!(!formatter.description().is_empty());
    }
}
