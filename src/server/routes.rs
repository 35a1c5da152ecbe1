//! HTTP API routes
//!
//! Defines all REST API endpoints for the server. Handlers validate their
//! query parameters, call at most one upstream adapter and reshape the result
//! into a fixed output schema.

use crate::constants::messages::{
    ADDRESS_NOT_FOUND, GEOCODE_FAILED, INTERNAL_ERROR, IP_LOOKUP_FAILED, METHOD_NOT_ALLOWED,
    REVERSE_GEOCODE_FAILED, ROUTE_NOT_FOUND, TIMEZONE_FAILED,
};
use crate::coord::haversine_distance;
use crate::geo::IpLookupResult;
use crate::server::response::ApiError;
use crate::server::state::AppState;
use crate::server::validate::{numeric_pair, require_all};

use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

const LAT_LON_REQUIRED: &str = "Latitude and longitude are required";
const ADDRESS_REQUIRED: &str = "Address is required";
const DISTANCE_PARAMS_REQUIRED: &str = "fromLat, fromLon, toLat and toLon are required";
const DISTANCE_PARAMS_NUMERIC: &str = "fromLat, fromLon, toLat and toLon must be numbers";

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/", get(root_handler).fallback(method_not_allowed_handler))
        .route("/health", get(health_handler).fallback(method_not_allowed_handler))
        .route("/ip/:ip", get(ip_handler).fallback(method_not_allowed_handler))
        .route(
            "/reverse-geocode",
            get(reverse_geocode_handler).fallback(method_not_allowed_handler),
        )
        .route("/geocode", get(geocode_handler).fallback(method_not_allowed_handler))
        .route("/distance", get(distance_handler).fallback(method_not_allowed_handler))
        .route("/timezone", get(timezone_handler).fallback(method_not_allowed_handler))
        .with_state(state);

    with_middleware(api)
}

/// Apply the fallback and cross-cutting layers shared by every route
pub fn with_middleware(router: Router) -> Router {
    router
        .fallback(fallback_handler)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Convert a panicking handler into a JSON 500
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        INTERNAL_ERROR.to_string()
    };

    ApiError::Internal(message).into_response()
}

async fn fallback_handler() -> ApiError {
    ApiError::NotFound(ROUTE_NOT_FOUND)
}

/// Known path, unsupported method
async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed(METHOD_NOT_ALLOWED)
}

/// Plain text greeting
///
/// GET /
async fn root_handler() -> &'static str {
    "Hello from geo-gateway!"
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Liveness check, independent of upstream providers
///
/// GET /health
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Look up geolocation data for an IP address
///
/// GET /ip/:ip
async fn ip_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<IpLookupResult>, ApiError> {
    let Path(ip) = path?;

    let result = state
        .providers
        .ip
        .lookup(&ip)
        .await
        .map_err(ApiError::upstream(IP_LOOKUP_FAILED))?;

    Ok(Json(result))
}

/// Latitude/longitude query, values kept as received
#[derive(Debug, Deserialize)]
pub struct LatLonQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Reverse geocoding response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReverseGeocodeResponse {
    pub latitude: String,
    pub longitude: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Resolve coordinates to an address
///
/// GET /reverse-geocode?lat=..&lon=..
async fn reverse_geocode_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LatLonQuery>, QueryRejection>,
) -> Result<Json<ReverseGeocodeResponse>, ApiError> {
    let Query(query) = query?;
    let [lat, lon] = require_all([&query.lat, &query.lon], LAT_LON_REQUIRED)?;

    let address = state
        .providers
        .nominatim
        .reverse(lat, lon)
        .await
        .map_err(ApiError::upstream(REVERSE_GEOCODE_FAILED))?;

    Ok(Json(ReverseGeocodeResponse {
        latitude: lat.to_string(),
        longitude: lon.to_string(),
        address,
    }))
}

/// Address query
#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    pub address: Option<String>,
}

/// Forward geocoding response
#[derive(Debug, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}

/// Resolve an address to coordinates using the first match
///
/// GET /geocode?address=..
async fn geocode_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<AddressQuery>, QueryRejection>,
) -> Result<Json<GeocodeResponse>, ApiError> {
    let Query(query) = query?;
    let [address] = require_all([&query.address], ADDRESS_REQUIRED)?;

    let place = state
        .providers
        .nominatim
        .search(address)
        .await
        .map_err(ApiError::upstream(GEOCODE_FAILED))?
        .ok_or(ApiError::NotFound(ADDRESS_NOT_FOUND))?;

    debug!("Geocoded {:?} to {:?}", address, place);

    Ok(Json(GeocodeResponse {
        query: address.to_string(),
        latitude: place.lat,
        longitude: place.lon,
        formatted_address: place.display_name,
    }))
}

/// Distance query
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceQuery {
    pub from_lat: Option<String>,
    pub from_lon: Option<String>,
    pub to_lat: Option<String>,
    pub to_lon: Option<String>,
}

/// A coordinate pair echoed as received
#[derive(Debug, Serialize, Deserialize)]
pub struct EchoedPoint {
    pub lat: String,
    pub lon: String,
}

/// Distance response
#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub from: EchoedPoint,
    pub to: EchoedPoint,
    pub distance_km: f64,
    pub distance_miles: f64,
}

/// Great-circle distance between two points, computed locally
///
/// GET /distance?fromLat=..&fromLon=..&toLat=..&toLon=..
async fn distance_handler(
    query: Result<Query<DistanceQuery>, QueryRejection>,
) -> Result<Json<DistanceResponse>, ApiError> {
    let Query(query) = query?;
    let [from_lat, from_lon, to_lat, to_lon] = require_all(
        [&query.from_lat, &query.from_lon, &query.to_lat, &query.to_lon],
        DISTANCE_PARAMS_REQUIRED,
    )?;

    let from = numeric_pair(from_lat, from_lon, DISTANCE_PARAMS_NUMERIC)?;
    let to = numeric_pair(to_lat, to_lon, DISTANCE_PARAMS_NUMERIC)?;
    let distance = haversine_distance(from, to);

    Ok(Json(DistanceResponse {
        from: EchoedPoint {
            lat: from_lat.to_string(),
            lon: from_lon.to_string(),
        },
        to: EchoedPoint {
            lat: to_lat.to_string(),
            lon: to_lon.to_string(),
        },
        distance_km: distance.km,
        distance_miles: distance.miles,
    }))
}

/// Timezone response
#[derive(Debug, Serialize, Deserialize)]
pub struct TimezoneResponse {
    pub latitude: String,
    pub longitude: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_time: Option<String>,
}

/// Current time in the configured zone
///
/// GET /timezone?lat=..&lon=..
///
/// The coordinates are required and echoed but do not select the zone.
async fn timezone_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LatLonQuery>, QueryRejection>,
) -> Result<Json<TimezoneResponse>, ApiError> {
    let Query(query) = query?;
    let [lat, lon] = require_all([&query.lat, &query.lon], LAT_LON_REQUIRED)?;

    let info = state
        .providers
        .timezone
        .current()
        .await
        .map_err(ApiError::upstream(TIMEZONE_FAILED))?;

    Ok(Json(TimezoneResponse {
        latitude: lat.to_string(),
        longitude: lon.to_string(),
        timezone: info.timezone,
        utc_offset: info.utc_offset,
        current_time: info.datetime,
    }))
}
