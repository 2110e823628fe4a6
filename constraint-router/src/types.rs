use serde::{Deserialize, Serialize};

use constraint_router_core::model::ConstraintBundle;

/// A WGS84 coordinate as it crosses the HTTP boundary. Distinct from the
/// core's `(f64, f64)` tuple pairs so request/response JSON carries field
/// names instead of positional ambiguity.
#[derive(Copy, Clone, Debug, Deserialize, Serialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// `POST /route` request body.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub city: Option<String>,
    pub source: Coord,
    pub target: Coord,
    #[serde(default)]
    pub constraints: ConstraintBundle,
    pub deadline_ms: Option<u64>,
}

/// The response body and, verbatim, the value stored in the result cache.
/// Identical on a cache hit and a freshly computed route: the cache stores
/// exactly what the client would otherwise receive.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RouteResult {
    pub city: String,
    pub source_node: i64,
    pub target_node: i64,
    pub constraints: ConstraintBundle,
    pub degraded: bool,
    pub reason: String,
    pub travel_time_sec_est: f64,
    pub nodes: Vec<i64>,
    pub geometry: Vec<Coord>,
    pub expanded_nodes: usize,
}
