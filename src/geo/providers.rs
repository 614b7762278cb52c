//! HTTP-backed geocoding and routing providers.
//!
//! Geocoding targets a Nominatim-compatible search endpoint; routing targets
//! an OpenRouteService-compatible directions endpoint. Both clients are
//! blocking: the planner is a sequential batch run, not a service, and every
//! external call happens on the one thread of control.

use std::time::Duration;

use serde::Deserialize;

use crate::geo::coords::Coord;
use crate::geo::resolver::{GeocodeError, GeocodingProvider};
use crate::geo::travel::{RoutingError, RoutingProvider};

pub const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_ROUTE_URL: &str =
    "https://api.openrouteservice.org/v2/directions/driving-car";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("praktika/", env!("CARGO_PKG_VERSION"));

/// Directions error code for a point that cannot be snapped to the road
/// network (e.g. in a field or on water).
const ERR_POINT_NOT_ROUTABLE: u32 = 2010;
/// Directions error code for "no route between points".
const ERR_NO_ROUTE: u32 = 2099;

fn build_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .expect("failed to create HTTP client")
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Nominatim-style forward geocoding (`GET <base>?q=...&format=json&limit=1`).
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_GEOCODE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingProvider for NominatimGeocoder {
    fn geocode(&mut self, query: &str) -> Result<Option<Coord>, GeocodeError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .map_err(|err| GeocodeError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Http(format!("status {status}")));
        }

        let hits: Vec<SearchHit> = response
            .json()
            .map_err(|err| GeocodeError::Malformed(err.to_string()))?;
        let Some(hit) = hits.first() else {
            return Ok(None);
        };

        let lat = hit
            .lat
            .parse()
            .map_err(|_| GeocodeError::Malformed(format!("bad latitude '{}'", hit.lat)))?;
        let lon = hit
            .lon
            .parse()
            .map_err(|_| GeocodeError::Malformed(format!("bad longitude '{}'", hit.lon)))?;
        Ok(Some(Coord::new(lat, lon)))
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    summary: DirectionsSummary,
}

#[derive(Debug, Deserialize)]
struct DirectionsSummary {
    /// Seconds.
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: u32,
    #[serde(default)]
    message: String,
}

/// OpenRouteService-style directions
/// (`POST <base>` with `{"coordinates": [[lon, lat], [lon, lat]]}`).
pub struct OrsRouter {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl OrsRouter {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_ROUTE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

impl RoutingProvider for OrsRouter {
    fn route_minutes(&mut self, from: Coord, to: Coord) -> Result<f64, RoutingError> {
        // The directions API expects (lon, lat) order.
        let body = serde_json::json!({
            "coordinates": [[from.lon, from.lat], [to.lon, to.lat]],
        });

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .map_err(|err| RoutingError::Unexpected(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimited);
        }
        if !status.is_success() {
            let detail: Option<ApiErrorBody> = response.json().ok();
            return Err(match detail {
                Some(body) if body.error.code == ERR_POINT_NOT_ROUTABLE => {
                    RoutingError::Unroutable
                }
                Some(body) if body.error.code == ERR_NO_ROUTE => RoutingError::NoRoute,
                Some(body) => RoutingError::Unexpected(format!(
                    "status {status}, code {}: {}",
                    body.error.code, body.error.message
                )),
                None => RoutingError::Unexpected(format!("status {status}")),
            });
        }

        let parsed: DirectionsResponse = response
            .json()
            .map_err(|err| RoutingError::Unexpected(err.to_string()))?;
        let route = parsed.routes.first().ok_or(RoutingError::NoRoute)?;
        Ok(route.summary.duration / 60.0)
    }
}
