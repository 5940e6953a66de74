//! Centralized constants for the placemark crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (WGS84 approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Fallback reference point for distance ranking (London)
    pub const DEFAULT_REFERENCE_LAT: f64 = 51.5074;
    pub const DEFAULT_REFERENCE_LNG: f64 = -0.1278;
}

/// External API endpoints
pub mod api {
    /// Free geocoding API (keyed free tier, string coordinates)
    pub const FREE_GEOCODING_URL: &str = "https://geocode.maps.co/search";

    /// Google Geocoding API (commercial, numeric coordinates)
    pub const GOOGLE_GEOCODING_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";
}

/// Search behavior
pub mod search {
    /// Quiet period before a pending search fires, in milliseconds
    pub const DEBOUNCE_MS: u64 = 300;
}
