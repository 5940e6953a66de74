//! Geocoding module
//!
//! Provides geocoding (free-text query to coordinates) through two
//! interchangeable provider backends, plus IP geolocation for a "my
//! location" reference point.

pub mod free_api;
pub mod google;
pub mod ip_location;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Which geocoding API produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiProvider {
    /// geocode.maps.co free tier
    #[serde(rename = "free-geocoding-api")]
    FreeGeocodingApi,
    /// Google Geocoding API
    #[serde(rename = "google-geocoding")]
    GoogleGeocoding,
}

impl std::fmt::Display for ApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FreeGeocodingApi => write!(f, "free-geocoding-api"),
            Self::GoogleGeocoding => write!(f, "google-geocoding"),
        }
    }
}

impl std::str::FromStr for ApiProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free-geocoding-api" | "free" => Ok(Self::FreeGeocodingApi),
            "google-geocoding" | "google" => Ok(Self::GoogleGeocoding),
            _ => Err(format!("Unknown API provider: {}", s)),
        }
    }
}

/// One resolved place, normalized across providers
///
/// Immutable once constructed; created per search and discarded after use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingResult {
    /// Display address (format varies by provider)
    pub address: String,
    /// Latitude in WGS84 degrees
    pub lat: f64,
    /// Longitude in WGS84 degrees
    pub lng: f64,
    /// Short descriptive string (category/type), when the provider has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Provider-specific identifier, used for precise provider links
    pub id: String,
    /// Which adapter produced this result
    pub provider: ApiProvider,
}

impl GeocodingResult {
    /// The result's coordinates as a value type
    pub fn coords(&self) -> crate::coord::Coordinates {
        crate::coord::Coordinates::new(self.lat, self.lng)
    }
}

/// Trait for geocoding provider backends
///
/// The search call is the only suspension point in the core; callers await
/// it and own any last-response-wins handling for overlapping calls.
pub trait GeocodingApi: Send + Sync {
    /// The provider tag stamped on results from this backend
    fn provider(&self) -> ApiProvider;

    /// Geocode a free-text query
    ///
    /// Returns all matches, or a classified failure. An empty list is a
    /// success, not an error.
    fn search(
        &self,
        query: &str,
        api_key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<GeocodingResult>>> + Send;
}

/// A geocoding backend selected by configured provider
#[derive(Debug, Clone)]
pub enum Geocoder {
    Free(free_api::FreeGeocodingBackend),
    Google(google::GoogleGeocodingBackend),
}

impl Geocoder {
    /// Create the backend for a provider
    pub fn for_provider(provider: ApiProvider) -> Self {
        match provider {
            ApiProvider::FreeGeocodingApi => Self::Free(free_api::FreeGeocodingBackend::new()),
            ApiProvider::GoogleGeocoding => Self::Google(google::GoogleGeocodingBackend::new()),
        }
    }

    /// The provider this geocoder dispatches to
    pub fn provider(&self) -> ApiProvider {
        match self {
            Self::Free(backend) => backend.provider(),
            Self::Google(backend) => backend.provider(),
        }
    }

    /// Search through the selected backend
    pub async fn search(&self, query: &str, api_key: &str) -> Result<Vec<GeocodingResult>> {
        match self {
            Self::Free(backend) => backend.search(query, api_key).await,
            Self::Google(backend) => backend.search(query, api_key).await,
        }
    }
}

/// Get the IP location service
pub fn get_ip_locator() -> ip_location::IpLocator {
    ip_location::IpLocator::new()
}
