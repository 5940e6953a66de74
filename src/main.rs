//! placemark CLI entry point
//!
//! Geocoding, map links, and place ranking - CLI + web app

use placemark::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
