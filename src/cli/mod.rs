//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod insert;
pub mod places;
pub mod search;
pub mod serve;

use clap::{Parser, Subcommand};

/// Geocoding, map links, and place ranking for Markdown notes
#[derive(Parser)]
#[command(name = "placemark")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Geocode a free-text query
    Search(search::SearchArgs),

    /// Geocode a note and insert properties into its frontmatter
    Insert(insert::InsertArgs),

    /// Rank and filter a place list
    Places(places::PlacesArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Insert(args) => insert::run(args).await,
        Commands::Places(args) => places::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
