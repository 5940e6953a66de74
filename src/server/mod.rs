//! HTTP server for placemark
//!
//! Provides REST API endpoints for geocoding and the place list feed.

pub mod routes;
pub mod state;

use crate::config::Config;
use crate::error::Result;
use crate::rank::LocatedItem;
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Start the HTTP server
///
/// # Arguments
/// * `config` - Server configuration
/// * `items` - Place list served by /api/places
///
/// # Returns
/// Never returns unless the server shuts down
pub async fn run(config: Config, items: Vec<LocatedItem>) -> Result<()> {
    let addr = config.server_addr();
    run_on(&addr, config, items).await
}

/// Start the HTTP server with a specific address
///
/// Useful for tests or when you want to override config
pub async fn run_on(addr: &str, config: Config, items: Vec<LocatedItem>) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| crate::error::Error::Server(format!("Invalid server address: {}", e)))?;

    let state = Arc::new(AppState::new(config, items));
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| crate::error::Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}
