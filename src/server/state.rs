//! Server shared state
//!
//! Holds configuration and the place list context for the HTTP server.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::geo::Geocoder;
use crate::rank::{LocatedItem, MapContext};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    /// Place list and live reference point; single owner of display state
    context: RwLock<MapContext>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, items: Vec<LocatedItem>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            context: RwLock::new(MapContext::new(items)),
        }
    }

    /// Build a geocoder and key from the current configuration
    pub async fn geocoder(&self) -> (Geocoder, String) {
        let config = self.config.read().await;
        (
            Geocoder::for_provider(config.api.provider),
            config.api.key.clone(),
        )
    }

    /// A snapshot of the place context
    pub async fn context(&self) -> MapContext {
        self.context.read().await.clone()
    }

    /// Update the live reference point
    pub async fn set_reference(&self, coords: Coordinates) {
        self.context.write().await.set_reference(coords);
    }

    /// Number of loaded places
    pub async fn place_count(&self) -> usize {
        self.context.read().await.items().len()
    }
}
