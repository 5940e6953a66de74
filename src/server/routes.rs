//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::Coordinates;
use crate::error::Error;
use crate::geo::GeocodingResult;
use crate::link::LinkStyle;
use crate::props::build_properties;
use crate::rank::{LocatedItem, RankingMode};
use crate::server::state::AppState;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/geocode", get(geocode_handler))
        .route("/api/places", get(places_handler))
        .route("/api/reference", post(reference_handler))
        .route("/api/properties", post(properties_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip, default = "default_error_status")]
    status: StatusCode,
}

fn default_error_status() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

impl ApiError {
    fn bad_request(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Error::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            Error::NoResults => (StatusCode::NOT_FOUND, "NO_RESULTS"),
            Error::ServerError { .. } => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Error::UnknownResponse(_) => (StatusCode::BAD_GATEWAY, "UNKNOWN_RESPONSE"),
            Error::Parse(_) => (StatusCode::BAD_GATEWAY, "PARSE_ERROR"),
            Error::InvalidCoordinates(_) => (StatusCode::BAD_REQUEST, "INVALID_COORDINATES"),
            Error::Config(_) => (StatusCode::BAD_REQUEST, "CONFIG_ERROR"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        ApiError {
            error: err.to_string(),
            code: code.to_string(),
            status,
        }
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Configured geocoding provider
    pub provider: String,
    /// Number of loaded places
    pub places: usize,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let provider = state.config.read().await.api.provider.to_string();

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider,
        places: state.place_count().await,
    })
}

/// Geocode query parameters
#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    /// Free-text query
    pub q: String,
}

/// Geocode response
#[derive(Debug, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub query: String,
    pub results: Vec<GeocodingResult>,
    pub count: usize,
}

/// Geocode a free-text query through the configured provider
///
/// GET /api/geocode?q=...
///
/// Adapter failures map onto HTTP statuses (401 unauthorized, 429 rate
/// limited, 404 no results, 502 upstream trouble). An empty result list is
/// a 200 with count zero.
async fn geocode_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<GeocodeResponse>, ApiError> {
    let query = params.q.trim().to_string();
    if query.is_empty() {
        return Err(ApiError::bad_request("Missing query", "MISSING_QUERY"));
    }

    let (geocoder, api_key) = state.geocoder().await;
    let results = geocoder.search(&query, &api_key).await.map_err(ApiError::from)?;

    Ok(Json(GeocodeResponse {
        count: results.len(),
        query,
        results,
    }))
}

/// Places query parameters
#[derive(Debug, Deserialize)]
pub struct PlacesParams {
    /// Sort mode; unrecognized values leave the list in load order
    pub sort: Option<String>,
    /// Radius filter in kilometers; zero or missing disables filtering
    pub radius_km: Option<f64>,
    /// Transient reference latitude for this view
    pub lat: Option<f64>,
    /// Transient reference longitude for this view
    pub lng: Option<f64>,
}

/// Places response
#[derive(Debug, Serialize, Deserialize)]
pub struct PlacesResponse {
    pub places: Vec<LocatedItem>,
    pub count: usize,
    pub reference: Coordinates,
}

/// Ranked, optionally radius-filtered place list
///
/// GET /api/places?sort=distance&radius_km=2&lat=..&lng=..
async fn places_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlacesParams>,
) -> Result<Json<PlacesResponse>, ApiError> {
    let config = state.config.read().await;
    let default_sort = config.ranking.default_sort;
    let default_radius = config.ranking.default_radius_km;
    let default_reference = config.default_reference();
    drop(config);

    let mode = match params.sort.as_deref() {
        None => Some(default_sort),
        Some(s) => RankingMode::from_str(s).ok(),
    };

    let radius_km = params.radius_km.unwrap_or(default_radius);
    let radius_km = (radius_km.is_finite() && radius_km > 0.0).then_some(radius_km);

    let mut context = state.context().await;
    if let (Some(lat), Some(lng)) = (params.lat, params.lng) {
        let coords = Coordinates::new(lat, lng);
        coords.validate().map_err(ApiError::from)?;
        context.set_reference(coords);
    } else if context.reference().is_none() {
        context.set_reference(default_reference);
    }

    let places = context.view(mode, radius_km);

    Ok(Json(PlacesResponse {
        count: places.len(),
        reference: context.effective_reference(),
        places,
    }))
}

/// Reference update request
#[derive(Debug, Deserialize)]
pub struct ReferenceRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Reference update response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReferenceResponse {
    pub reference: Coordinates,
}

/// Set the live reference point for distance views
///
/// POST /api/reference
async fn reference_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReferenceRequest>,
) -> Result<Json<ReferenceResponse>, ApiError> {
    let coords = Coordinates::new(req.lat, req.lng);
    coords.validate().map_err(ApiError::from)?;

    state.set_reference(coords).await;

    Ok(Json(ReferenceResponse { reference: coords }))
}

/// Property build request
#[derive(Debug, Deserialize)]
pub struct PropertiesRequest {
    /// The selected geocoding result
    pub result: GeocodingResult,
    /// Frontmatter already present in the target note
    #[serde(default)]
    pub existing: serde_json::Map<String, serde_json::Value>,
    /// Override of the configured map link style
    pub link_style: Option<LinkStyle>,
}

/// Property build response
#[derive(Debug, Serialize, Deserialize)]
pub struct PropertiesResponse {
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// Build the frontmatter diff for a selected result
///
/// POST /api/properties
async fn properties_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PropertiesRequest>,
) -> Result<Json<PropertiesResponse>, ApiError> {
    req.result.coords().validate().map_err(ApiError::from)?;

    let config = state.config.read().await;
    let link_style = req.link_style.unwrap_or(config.links.map_link);

    let properties = build_properties(
        &req.result,
        &config.properties,
        config.behavior.override_existing_properties,
        &req.existing,
        link_style,
    );

    Ok(Json(PropertiesResponse { properties }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::coord::Coordinates;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn item(title: &str, lat: f64, lng: f64, rating: f64, created: &str) -> LocatedItem {
        LocatedItem {
            title: title.to_string(),
            coords: Coordinates::new(lat, lng),
            rating,
            created: created.parse().unwrap(),
            details: serde_json::Value::Null,
        }
    }

    /// Three places north of the default reference at ~5km, ~1km, ~3km
    fn test_state() -> Arc<AppState> {
        let items = vec![
            item("five-km", 51.5524, -0.1278, 3.0, "2024-01-10"),
            item("one-km", 51.5164, -0.1278, 4.5, "2024-03-01"),
            item("three-km", 51.5344, -0.1278, 4.0, "2023-12-25"),
        ];
        Arc::new(AppState::new(Config::default(), items))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        state: Arc<AppState>,
        uri: &str,
    ) -> (StatusCode, T) {
        let app = create_router(state);
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                Error::Unauthorized("bad key".to_string()),
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
            ),
            (
                Error::RateLimited {
                    message: "slow down".to_string(),
                    retry_after_secs: Some(30),
                },
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
            ),
            (Error::NoResults, StatusCode::NOT_FOUND, "NO_RESULTS"),
            (
                Error::ServerError { status: 500 },
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
            ),
            (
                Error::UnknownResponse("HUH".to_string()),
                StatusCode::BAD_GATEWAY,
                "UNKNOWN_RESPONSE",
            ),
            (
                Error::Parse("bad lat".to_string()),
                StatusCode::BAD_GATEWAY,
                "PARSE_ERROR",
            ),
        ];

        for (err, status, code) in cases {
            let api_err = ApiError::from(err);
            assert_eq!(api_err.status, status);
            assert_eq!(api_err.code, code);
        }
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let (status, body): (_, StatusResponse) =
            get_json(test_state(), "/api/status").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.running);
        assert_eq!(body.provider, "free-geocoding-api");
        assert_eq!(body.places, 3);
    }

    #[tokio::test]
    async fn test_places_default_sort_is_distance() {
        let (status, body): (_, PlacesResponse) =
            get_json(test_state(), "/api/places").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.count, 3);
        let titles: Vec<&str> = body.places.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["one-km", "three-km", "five-km"]);
    }

    #[tokio::test]
    async fn test_places_sort_by_rating() {
        let (_, body): (_, PlacesResponse) =
            get_json(test_state(), "/api/places?sort=rating").await;

        let titles: Vec<&str> = body.places.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["one-km", "three-km", "five-km"]);
    }

    #[tokio::test]
    async fn test_places_unknown_sort_keeps_load_order() {
        let (status, body): (_, PlacesResponse) =
            get_json(test_state(), "/api/places?sort=popularity").await;

        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body.places.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["five-km", "one-km", "three-km"]);
    }

    #[tokio::test]
    async fn test_places_radius_filter() {
        let (_, body): (_, PlacesResponse) =
            get_json(test_state(), "/api/places?radius_km=2").await;

        assert_eq!(body.count, 1);
        assert_eq!(body.places[0].title, "one-km");
    }

    #[tokio::test]
    async fn test_places_zero_radius_keeps_everything() {
        let (_, body): (_, PlacesResponse) =
            get_json(test_state(), "/api/places?radius_km=0").await;
        assert_eq!(body.count, 3);
    }

    #[tokio::test]
    async fn test_places_transient_reference() {
        // Reference near the five-km item flips the distance order
        let (_, body): (_, PlacesResponse) =
            get_json(test_state(), "/api/places?lat=51.5524&lng=-0.1278").await;

        assert_eq!(body.places[0].title, "five-km");
        assert_eq!(body.reference, Coordinates::new(51.5524, -0.1278));
    }

    #[tokio::test]
    async fn test_places_invalid_reference_rejected() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/places?lat=95&lng=0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_reference_endpoint_updates_state() {
        let state = test_state();
        let app = create_router(state.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/reference")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"lat": 51.5524, "lng": -0.1278}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let (_, body): (_, PlacesResponse) = get_json(state, "/api/places").await;
        assert_eq!(body.places[0].title, "five-km");
    }

    #[tokio::test]
    async fn test_geocode_missing_query() {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/geocode?q=")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "MISSING_QUERY");
    }

    #[tokio::test]
    async fn test_properties_endpoint() {
        let app = create_router(test_state());

        let request_body = serde_json::json!({
            "result": {
                "address": "X",
                "lat": 1.5,
                "lng": -2.5,
                "id": "42",
                "provider": "free-geocoding-api"
            },
            "link_style": "osm"
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/properties")
                    .header("Content-Type", "application/json")
                    .body(Body::from(request_body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let props: PropertiesResponse = serde_json::from_slice(&body).unwrap();

        // Default config writes only the address property
        assert_eq!(props.properties.len(), 1);
        assert_eq!(
            props.properties["address"],
            serde_json::Value::String("X".to_string())
        );
    }

    #[tokio::test]
    async fn test_properties_invalid_result_rejected() {
        let app = create_router(test_state());

        let request_body = serde_json::json!({
            "result": {
                "address": "X",
                "lat": 123.0,
                "lng": 0.0,
                "id": "42",
                "provider": "free-geocoding-api"
            }
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/properties")
                    .header("Content-Type", "application/json")
                    .body(Body::from(request_body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
