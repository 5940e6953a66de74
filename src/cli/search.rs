//! Search command handler
//!
//! Geocodes a free-text query and prints the results.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, OutputFormatter};
use crate::geo::Geocoder;
use crate::search::Debouncer;
use clap::Args;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query
    pub query: Option<String>,

    /// Geocoding provider (free-geocoding-api or google-geocoding)
    #[arg(long, short = 'p')]
    pub provider: Option<String>,

    /// API key (defaults to the configured key)
    #[arg(long, short = 'k')]
    pub api_key: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Read queries from stdin, debounced
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    if args.list_formats {
        for format in available_formats() {
            println!("{:<8} {}", format.name, format.description);
        }
        return Ok(());
    }

    let config = Config::load()?;

    let provider = match &args.provider {
        Some(name) => name.parse().map_err(Error::Config)?,
        None => config.api.provider,
    };
    let api_key = args.api_key.clone().unwrap_or_else(|| config.api.key.clone());
    let geocoder = Geocoder::for_provider(provider);

    let format_name = args.format.as_deref().unwrap_or("text");
    let formatter = get_formatter(format_name)
        .ok_or_else(|| Error::Config(format!("Unknown output format: {}", format_name)))?;

    if args.interactive {
        return interactive(geocoder, api_key, Arc::from(formatter), Arc::new(config)).await;
    }

    let Some(query) = args.query.as_deref() else {
        eprintln!("Error: No query given. Pass a query or use --interactive");
        std::process::exit(1);
    };

    let results = geocoder.search(query, &api_key).await?;
    if results.is_empty() {
        println!("No results found for \"{}\"", query);
        return Ok(());
    }

    print!("{}", formatter.format(&results, &config)?);
    Ok(())
}

/// Read queries from stdin, firing one search per quiet period
///
/// Adapter failures are printed and the query treated as having produced
/// zero results; the loop keeps going.
async fn interactive(
    geocoder: Geocoder,
    api_key: String,
    formatter: Arc<dyn OutputFormatter>,
    config: Arc<Config>,
) -> Result<()> {
    eprintln!("Type a query per line (Ctrl-D to quit)");

    let mut debouncer = Debouncer::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let query = line.trim().to_string();
        if query.is_empty() {
            continue;
        }

        let geocoder = geocoder.clone();
        let api_key = api_key.clone();
        let formatter = formatter.clone();
        let config = config.clone();

        debouncer.submit(async move {
            match geocoder.search(&query, &api_key).await {
                Ok(results) if results.is_empty() => {
                    println!("No results found for \"{}\"", query);
                }
                Ok(results) => match formatter.format(&results, &config) {
                    Ok(output) => print!("{}", output),
                    Err(e) => eprintln!("Error: {}", e),
                },
                Err(e) => eprintln!("Error: {}", e),
            }
        });
    }

    debouncer.flush().await;
    Ok(())
}
