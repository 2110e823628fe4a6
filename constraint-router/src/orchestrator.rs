use std::time::Instant;

use constraint_router_core::algorithm::search::{astar, dijkstra, SearchOutcome};
use constraint_router_core::model::network::{GraphBundle, NodeIdx};
use constraint_router_core::model::ConstraintBundle;
use constraint_router_core::util::geo::nearest_node;

use crate::cache::RouteCache;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::fingerprint::fingerprint;
use crate::metrics::Metrics;
use crate::store::{GraphCache, GraphSource, PostgresGraphSource};
use crate::types::{Coord, RouteRequest, RouteResult};

/// Minimum deadline accepted by the search.
const MIN_DEADLINE_SEC: f64 = 0.05;

/// Runs A*, falling back to unconstrained Dijkstra when A* reports no path.
/// `Err` carries the combined expanded-node count for the failure message
/// when both searches agree the endpoints are disconnected.
fn run_search(
    bundle: &GraphBundle,
    source_idx: NodeIdx,
    target_idx: NodeIdx,
    constraints: ConstraintBundle,
    deadline_sec: f64,
) -> Result<SearchOutcome, usize> {
    let outcome = astar(bundle, source_idx, target_idx, &constraints, deadline_sec);
    if outcome.reason != "no_path" {
        return Ok(outcome);
    }

    log::debug!("astar found no path, falling back to unconstrained dijkstra");
    let fallback = dijkstra(bundle, source_idx, target_idx);
    if fallback.reason.is_empty() {
        Ok(SearchOutcome {
            degraded: true,
            reason: "fallback_dijkstra",
            ..fallback
        })
    } else {
        Err(outcome.expanded_count + fallback.expanded_count)
    }
}

/// Composes the graph store, cost model, search core, fallback search, result
/// cache, and metrics sink behind a single `route` call. One instance is
/// shared (behind an `Arc`) across every HTTP worker task. Generic over the
/// graph source so tests can swap in an in-memory fake; the running service
/// always instantiates `Orchestrator<PostgresGraphSource>`.
pub struct Orchestrator<S: GraphSource = PostgresGraphSource> {
    config: AppConfig,
    graph_cache: GraphCache<S>,
    route_cache: RouteCache,
    pub metrics: Metrics,
}

impl<S: GraphSource> Orchestrator<S> {
    pub fn new(config: AppConfig, graph_cache: GraphCache<S>, route_cache: RouteCache, metrics: Metrics) -> Self {
        Orchestrator {
            config,
            graph_cache,
            route_cache,
            metrics,
        }
    }

    /// Executes the full per-request pipeline: cache lookup, graph load,
    /// nearest-node snap, search with fallback, metrics, cache store. Returns
    /// the response payload on success, an [`ApiError`] whose `IntoResponse`
    /// impl carries the right HTTP status otherwise.
    pub async fn route(&self, request: RouteRequest) -> Result<RouteResult, ApiError> {
        if !request.source.is_finite() || !request.target.is_finite() {
            return Err(ApiError::BadRequest(
                "source and target coordinates must be finite numbers".to_string(),
            ));
        }

        let city = request
            .city
            .unwrap_or_else(|| self.config.default_city.clone())
            .to_lowercase();
        let constraints = request.constraints;
        let deadline_ms = request.deadline_ms.unwrap_or(self.config.route_deadline_ms);
        let deadline_sec = (deadline_ms as f64 / 1000.0).max(MIN_DEADLINE_SEC);

        let fp = fingerprint(&city, request.source, request.target, &constraints);

        if let Some(cached) = self.route_cache.get(&fp).await {
            self.metrics.record_request(&city, cached.degraded, true);
            return Ok(cached);
        }

        let bundle = self.graph_cache.load(&city).await.map_err(ApiError::from)?;

        let source_idx = NodeIdx(nearest_node(bundle.all_coords(), (request.source.lat, request.source.lon)));
        let target_idx = NodeIdx(nearest_node(bundle.all_coords(), (request.target.lat, request.target.lon)));

        let started = Instant::now();
        // A* (and its Dijkstra fallback) is CPU-bound and can run for up to
        // `deadline_sec`; offloaded to the blocking pool so a slow search
        // never stalls other requests' async work on this worker.
        let search_bundle = bundle.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            run_search(&search_bundle, source_idx, target_idx, constraints, deadline_sec)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("search task panicked: {e}")))?;

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(expanded_count) => {
                self.metrics.record_failure(&city, "unreachable");
                return Err(ApiError::NoPath(format!(
                    "no path between source and target in city {city} after expanding {expanded_count} nodes"
                )));
            }
        };

        let elapsed = started.elapsed().as_secs_f64();
        self.metrics.observe_duration(&city, elapsed);
        self.metrics.observe_expanded(&city, outcome.expanded_count);
        self.metrics.record_request(&city, outcome.degraded, false);

        let nodes: Vec<i64> = outcome
            .path_nodes
            .iter()
            .filter_map(|&idx| bundle.node_id(idx).map(|id| id.0))
            .collect();
        let geometry: Vec<Coord> = outcome
            .path_nodes
            .iter()
            .filter_map(|&idx| bundle.coord(idx).map(|(lat, lon)| Coord { lat, lon }))
            .collect();

        let result = RouteResult {
            city,
            source_node: bundle.node_id(source_idx).map(|id| id.0).unwrap_or_default(),
            target_node: bundle.node_id(target_idx).map(|id| id.0).unwrap_or_default(),
            constraints,
            degraded: outcome.degraded,
            reason: outcome.reason.to_string(),
            travel_time_sec_est: outcome.total_cost,
            nodes,
            geometry,
            expanded_nodes: outcome.expanded_count,
        };

        self.route_cache.set(&fp, &result).await;

        Ok(result)
    }
}
