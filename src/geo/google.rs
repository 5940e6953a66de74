//! Google Geocoding API backend
//!
//! Commercial API. The HTTP layer only signals transport problems; the
//! real outcome is the `status` field carried in a 200 body.

use crate::constants::api::GOOGLE_GEOCODING_URL;
use crate::error::{Error, Result};
use crate::geo::{ApiProvider, GeocodingApi, GeocodingResult};
use serde::Deserialize;

const USER_AGENT: &str = "placemark/0.1.0";

/// Google Geocoding API backend
#[derive(Debug, Clone)]
pub struct GoogleGeocodingBackend {
    client: reqwest::Client,
}

/// Google Geocoding API response envelope
#[derive(Debug, Deserialize)]
struct GoogleResponse {
    status: String,
    #[serde(default)]
    results: Vec<GoogleResult>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    formatted_address: String,
    geometry: GoogleGeometry,
    #[serde(default)]
    types: Vec<String>,
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: GoogleLocation,
}

#[derive(Debug, Deserialize)]
struct GoogleLocation {
    lat: f64,
    lng: f64,
}

impl GoogleGeocodingBackend {
    /// Create a new Google geocoding backend
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Normalize one raw response item
    fn normalize(raw: GoogleResult) -> Result<GeocodingResult> {
        let info = if raw.types.is_empty() {
            None
        } else {
            Some(raw.types.join(", "))
        };

        let result = GeocodingResult {
            address: raw.formatted_address,
            lat: raw.geometry.location.lat,
            lng: raw.geometry.location.lng,
            info,
            id: raw.place_id,
            provider: ApiProvider::GoogleGeocoding,
        };
        result.coords().validate()?;
        Ok(result)
    }

    /// Decode a response into normalized results or a classified failure
    ///
    /// Pure function of the response parts, so it is testable without
    /// network access.
    fn decode_response(status: u16, body: &str) -> Result<Vec<GeocodingResult>> {
        if status != 200 {
            return Err(Error::ServerError { status });
        }

        let response: GoogleResponse = serde_json::from_str(body)
            .map_err(|e| Error::Parse(format!("Invalid geocoding response: {}", e)))?;

        match response.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(Error::NoResults),
            "OVER_DAILY_LIMIT" => {
                return Err(Error::RateLimited {
                    message: "Over daily limit".to_string(),
                    retry_after_secs: None,
                })
            }
            "OVER_QUERY_LIMIT" => {
                return Err(Error::RateLimited {
                    message: "Over query limit".to_string(),
                    retry_after_secs: None,
                })
            }
            "REQUEST_DENIED" => {
                return Err(Error::Unauthorized(
                    "Request denied (invalid API key?)".to_string(),
                ))
            }
            other => return Err(Error::UnknownResponse(other.to_string())),
        }

        response.results.into_iter().map(Self::normalize).collect()
    }
}

impl Default for GoogleGeocodingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingApi for GoogleGeocodingBackend {
    fn provider(&self) -> ApiProvider {
        ApiProvider::GoogleGeocoding
    }

    async fn search(&self, query: &str, api_key: &str) -> Result<Vec<GeocodingResult>> {
        let url = format!(
            "{}?address={}&key={}",
            GOOGLE_GEOCODING_URL,
            urlencoding::encode(query),
            urlencoding::encode(api_key)
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Self::decode_response(status, &body)
    }
}
