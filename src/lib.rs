//! placemark: geocoding, map links, and place ranking for Markdown notes
//!
//! A library and CLI tool that geocodes free-text queries through one of
//! two interchangeable providers, derives external map links, writes the
//! result into note frontmatter, and ranks/filters a list of located
//! places.
//!
//! ## Features
//!
//! - Two geocoding backends behind one normalized result shape
//! - Google/Apple/OpenStreetMap link derivation
//! - Distance/rating/date ranking with radius filtering
//! - Frontmatter property writer for Markdown notes
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use placemark::coord::distance::haversine_distance;
//! use placemark::coord::Coordinates;
//! use placemark::geo::{ApiProvider, GeocodingResult};
//! use placemark::link::{make_map_link, LinkStyle};
//!
//! let london = Coordinates::new(51.5074, -0.1278);
//! let paris = Coordinates::new(48.8566, 2.3522);
//! let meters = haversine_distance(london, paris);
//! assert!((meters - 343_000.0).abs() < 5_000.0);
//!
//! let result = GeocodingResult {
//!     address: "Paris, France".to_string(),
//!     lat: paris.lat,
//!     lng: paris.lng,
//!     info: None,
//!     id: "abc".to_string(),
//!     provider: ApiProvider::GoogleGeocoding,
//! };
//! assert!(make_map_link(&result, LinkStyle::Google).contains("query_place_id=abc"));
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod link;
pub mod note;
pub mod props;
pub mod rank;
pub mod search;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use geo::{ApiProvider, Geocoder, GeocodingResult};
pub use link::LinkStyle;
pub use rank::{LocatedItem, MapContext, RankingMode};
