//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::GeocodingResult;

/// JSON formatter - pretty-printed full results
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON results"
    }

    fn format(&self, results: &[GeocodingResult], _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(results)?)
    }
}
