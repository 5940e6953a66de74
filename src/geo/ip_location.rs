//! IP-based geolocation
//!
//! Uses ip-api.com to approximate the machine's location. Serves as the
//! reference point for distance ranking when the user asks for "here".

use crate::constants::api::IP_API_URL;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::Deserialize;

/// IP location service
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
}

/// A located position with a human-readable label
#[derive(Debug, Clone)]
pub struct IpLocation {
    pub coords: Coordinates,
    pub label: String,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
}

impl IpLocator {
    /// Create a new IP locator
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Get the current location based on IP address
    pub async fn locate(&self) -> Result<IpLocation> {
        let response = self
            .client
            .get(IP_API_URL)
            .send()
            .await
            .map_err(|e| Error::Server(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ServerError {
                status: response.status().as_u16(),
            });
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(format!("Invalid IP location response: {}", e)))?;

        Self::normalize(data)
    }

    fn normalize(data: IpApiResponse) -> Result<IpLocation> {
        if data.status != "success" {
            return Err(Error::Server("IP location lookup failed".to_string()));
        }

        let lat = data
            .lat
            .ok_or_else(|| Error::Parse("No latitude in IP location response".to_string()))?;
        let lng = data
            .lon
            .ok_or_else(|| Error::Parse("No longitude in IP location response".to_string()))?;

        let coords = Coordinates::new(lat, lng);
        coords.validate()?;

        let label = [data.city, data.region_name, data.country]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        Ok(IpLocation {
            coords,
            label: if label.is_empty() {
                "Unknown Location".to_string()
            } else {
                label
            },
        })
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_success() {
        let data = IpApiResponse {
            status: "success".to_string(),
            lat: Some(40.7128),
            lon: Some(-74.0060),
            city: Some("New York".to_string()),
            region_name: Some("New York".to_string()),
            country: Some("United States".to_string()),
        };

        let location = IpLocator::normalize(data).unwrap();
        assert_eq!(location.coords.lat, 40.7128);
        assert_eq!(location.label, "New York, New York, United States");
    }

    #[test]
    fn test_normalize_failure_status() {
        let data = IpApiResponse {
            status: "fail".to_string(),
            lat: None,
            lon: None,
            city: None,
            region_name: None,
            country: None,
        };

        assert!(IpLocator::normalize(data).is_err());
    }

    #[test]
    fn test_normalize_missing_fields_label() {
        let data = IpApiResponse {
            status: "success".to_string(),
            lat: Some(1.0),
            lon: Some(2.0),
            city: None,
            region_name: None,
            country: None,
        };

        let location = IpLocator::normalize(data).unwrap();
        assert_eq!(location.label, "Unknown Location");
    }
}
