//! Insert command handler
//!
//! Geocodes a note's search term and merges the resulting properties into
//! its frontmatter.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::Geocoder;
use crate::note::Note;
use crate::props::build_properties;
use clap::Args;
use std::path::PathBuf;

/// Insert command arguments
#[derive(Args)]
pub struct InsertArgs {
    /// Path to the Markdown note
    pub note: PathBuf,

    /// Search term (defaults to the note's address, title, or file stem)
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Which result to insert, 1-based
    #[arg(long, short = 'n', default_value_t = 1)]
    pub result: usize,

    /// Override existing frontmatter keys
    #[arg(long)]
    pub r#override: bool,

    /// Print the property diff without writing the note
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the insert command
pub async fn run(args: InsertArgs) -> Result<()> {
    let config = Config::load()?;
    let mut note = Note::load(&args.note)?;

    let query = match &args.query {
        Some(query) => query.clone(),
        None => note.search_term(),
    };

    let geocoder = Geocoder::for_provider(config.api.provider);
    let results = geocoder.search(&query, &config.api.key).await?;

    if results.is_empty() {
        println!("No results found for \"{}\"", query);
        return Ok(());
    }

    if args.result == 0 || args.result > results.len() {
        return Err(Error::Config(format!(
            "Result {} out of range (1..={})",
            args.result,
            results.len()
        )));
    }
    let result = &results[args.result - 1];
    eprintln!("Geocoded to: {}", result.address);

    let override_existing = args.r#override || config.behavior.override_existing_properties;
    let entries = build_properties(
        result,
        &config.properties,
        override_existing,
        &note.frontmatter_json()?,
        config.links.map_link,
    );

    if entries.is_empty() {
        println!("Nothing to insert (all enabled properties already present)");
        return Ok(());
    }

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let count = entries.len();
    note.merge(&entries)?;
    note.save()?;
    println!(
        "Inserted {} propert{} into {}",
        count,
        if count == 1 { "y" } else { "ies" },
        args.note.display()
    );

    Ok(())
}
