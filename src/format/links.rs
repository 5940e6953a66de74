//! Map link output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::GeocodingResult;
use crate::link::make_map_link;

/// Links formatter - one map URL per result, in the configured style
pub struct LinksFormatter;

impl OutputFormatter for LinksFormatter {
    fn name(&self) -> &str {
        "links"
    }

    fn description(&self) -> &str {
        "Map links in the configured style"
    }

    fn format(&self, results: &[GeocodingResult], config: &Config) -> Result<String> {
        let mut output = String::new();

        for result in results {
            output.push_str(&make_map_link(result, config.links.map_link));
            output.push('\n');
        }

        Ok(output)
    }
}
