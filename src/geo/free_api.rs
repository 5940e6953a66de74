//! Free geocoding API backend (geocode.maps.co)
//!
//! Keyed free tier. Coordinates arrive as strings and are parsed
//! explicitly; a malformed value is an error, never a silent NaN.

use crate::constants::api::FREE_GEOCODING_URL;
use crate::error::{Error, Result};
use crate::geo::{ApiProvider, GeocodingApi, GeocodingResult};
use serde::Deserialize;

const USER_AGENT: &str = "placemark/0.1.0";

/// Free geocoding API backend
#[derive(Debug, Clone)]
pub struct FreeGeocodingBackend {
    client: reqwest::Client,
}

/// Free geocoding API response item
#[derive(Debug, Deserialize)]
struct FreeApiResult {
    display_name: String,
    lat: String,
    lon: String,
    class: String,
    #[serde(rename = "type")]
    kind: String,
    osm_id: i64,
}

impl FreeGeocodingBackend {
    /// Create a new free geocoding backend
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Parse a lat/lon string to f64
    fn parse_coord(field: &str, value: &str) -> Result<f64> {
        value
            .trim()
            .parse()
            .map_err(|_| Error::Parse(format!("Invalid {}: {}", field, value)))
    }

    /// Normalize one raw response item
    fn normalize(raw: FreeApiResult) -> Result<GeocodingResult> {
        let lat = Self::parse_coord("latitude", &raw.lat)?;
        let lng = Self::parse_coord("longitude", &raw.lon)?;

        let result = GeocodingResult {
            address: raw.display_name,
            lat,
            lng,
            info: Some(format!("{} {}", raw.class, raw.kind)),
            id: raw.osm_id.to_string(),
            provider: ApiProvider::FreeGeocodingApi,
        };
        result.coords().validate()?;
        Ok(result)
    }

    /// Decode a response into normalized results or a classified failure
    ///
    /// Pure function of the response parts, so it is testable without
    /// network access.
    fn decode_response(
        status: u16,
        retry_after: Option<&str>,
        body: &str,
    ) -> Result<Vec<GeocodingResult>> {
        match status {
            200 => {}
            401 => {
                return Err(Error::Unauthorized(
                    "Please check your API key.".to_string(),
                ))
            }
            409 | 503 => return Err(rate_limited(retry_after)),
            _ => return Err(Error::ServerError { status }),
        }

        let raw: Vec<FreeApiResult> = serde_json::from_str(body)
            .map_err(|e| Error::Parse(format!("Invalid geocoding response: {}", e)))?;

        raw.into_iter().map(Self::normalize).collect()
    }
}

/// Build the rate-limit failure, honoring a delta-seconds Retry-After
fn rate_limited(retry_after: Option<&str>) -> Error {
    let retry_after_secs = retry_after.and_then(|v| v.trim().parse::<u64>().ok());
    let message = match retry_after_secs {
        Some(secs) => format!("Too many requests. Please try again in {} seconds.", secs),
        None => "Too many requests. Please try again later.".to_string(),
    };
    Error::RateLimited {
        message,
        retry_after_secs,
    }
}

impl Default for FreeGeocodingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingApi for FreeGeocodingBackend {
    fn provider(&self) -> ApiProvider {
        ApiProvider::FreeGeocodingApi
    }

    async fn search(&self, query: &str, api_key: &str) -> Result<Vec<GeocodingResult>> {
        let url = format!(
            "{}?q={}&api_key={}",
            FREE_GEOCODING_URL,
            urlencoding::encode(query),
            urlencoding::encode(api_key)
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        Self::decode_response(status, retry_after.as_deref(), &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_RESULT: &str = r#"[{
        "display_name": "X",
        "lat": "1.5",
        "lon": "-2.5",
        "class": "place",
        "type": "city",
        "osm_id": 42
    }]"#;

    #[test]
    fn test_decode_single_result() {
        let results = FreeGeocodingBackend::decode_response(200, None, ONE_RESULT).unwrap();

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.address, "X");
        assert_eq!(result.lat, 1.5);
        assert_eq!(result.lng, -2.5);
        assert_eq!(result.info.as_deref(), Some("place city"));
        assert_eq!(result.id, "42");
        assert_eq!(result.provider, ApiProvider::FreeGeocodingApi);
    }

    #[test]
    fn test_decode_empty_array_is_success() {
        let results = FreeGeocodingBackend::decode_response(200, None, "[]").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_unauthorized() {
        let err = FreeGeocodingBackend::decode_response(401, None, "").unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn test_rate_limited_with_retry_after() {
        let err = FreeGeocodingBackend::decode_response(409, Some("30"), "").unwrap_err();
        match err {
            Error::RateLimited {
                retry_after_secs, ..
            } => assert_eq!(retry_after_secs, Some(30)),
            other => panic!("Expected RateLimited, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_limited_without_retry_after() {
        for status in [409, 503] {
            let err = FreeGeocodingBackend::decode_response(status, None, "").unwrap_err();
            match err {
                Error::RateLimited {
                    retry_after_secs, ..
                } => assert_eq!(retry_after_secs, None),
                other => panic!("Expected RateLimited, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_rate_limited_http_date_ignored() {
        // Only the delta-seconds form carries a value
        let err = FreeGeocodingBackend::decode_response(
            503,
            Some("Wed, 21 Oct 2026 07:28:00 GMT"),
            "",
        )
        .unwrap_err();
        match err {
            Error::RateLimited {
                retry_after_secs, ..
            } => assert_eq!(retry_after_secs, None),
            other => panic!("Expected RateLimited, got {:?}", other),
        }
    }

    #[test]
    fn test_other_status_is_server_error() {
        let err = FreeGeocodingBackend::decode_response(500, None, "").unwrap_err();
        assert!(matches!(err, Error::ServerError { status: 500 }));
    }

    #[test]
    fn test_malformed_coordinate_is_parse_error() {
        let body = r#"[{
            "display_name": "X",
            "lat": "not-a-number",
            "lon": "-2.5",
            "class": "place",
            "type": "city",
            "osm_id": 42
        }]"#;

        let err = FreeGeocodingBackend::decode_response(200, None, body).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_out_of_range_coordinate_rejected() {
        let body = r#"[{
            "display_name": "X",
            "lat": "95.0",
            "lon": "0.0",
            "class": "place",
            "type": "city",
            "osm_id": 42
        }]"#;

        let err = FreeGeocodingBackend::decode_response(200, None, body).unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinates(_)));
    }

    #[test]
    fn test_backend_creation() {
        let backend = FreeGeocodingBackend::new();
        assert_eq!(backend.provider(), ApiProvider::FreeGeocodingApi);
    }
}
