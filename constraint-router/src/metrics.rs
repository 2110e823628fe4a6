use prometheus::{
    register_histogram_vec_with_registry, register_int_counter_vec_with_registry, HistogramVec,
    IntCounterVec, Registry, TextEncoder,
};

const DURATION_BUCKETS: &[f64] = &[0.05, 0.1, 0.2, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 10.0];
const EXPANDED_BUCKETS: &[f64] = &[
    10.0, 50.0, 100.0, 200.0, 400.0, 800.0, 1600.0, 3200.0, 6400.0,
];

/// Process-wide metrics sink, registered against its own `prometheus::Registry`
/// rather than the crate-global default so the service owns its lifecycle.
pub struct Metrics {
    registry: Registry,
    pub requests_total: IntCounterVec,
    pub failures_total: IntCounterVec,
    pub route_duration_seconds: HistogramVec,
    pub astar_expanded_nodes: HistogramVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let requests_total = register_int_counter_vec_with_registry!(
            "route_requests_total",
            "Total route requests",
            &["city", "degraded", "cache_hit"],
            registry
        )
        .expect("route_requests_total registers exactly once");

        let failures_total = register_int_counter_vec_with_registry!(
            "route_failures_total",
            "Route calculation failures",
            &["city", "reason"],
            registry
        )
        .expect("route_failures_total registers exactly once");

        let route_duration_seconds = register_histogram_vec_with_registry!(
            "route_duration_seconds",
            "Route calculation duration in seconds",
            &["city"],
            DURATION_BUCKETS.to_vec(),
            registry
        )
        .expect("route_duration_seconds registers exactly once");

        let astar_expanded_nodes = register_histogram_vec_with_registry!(
            "astar_expanded_nodes",
            "Number of nodes expanded by the search",
            &["city"],
            EXPANDED_BUCKETS.to_vec(),
            registry
        )
        .expect("astar_expanded_nodes registers exactly once");

        Metrics {
            registry,
            requests_total,
            failures_total,
            route_duration_seconds,
            astar_expanded_nodes,
        }
    }

    /// Renders the registry in Prometheus text exposition format for `GET /metrics`.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        let mut buf = Vec::new();
        if let Err(e) = encoder.encode(&families, &mut buf) {
            return format!("# failed to encode metrics: {e}\n");
        }
        String::from_utf8(buf).unwrap_or_else(|e| format!("# metrics buffer was not valid utf-8: {e}\n"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn bool_label(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

impl Metrics {
    /// Increments `route_requests_total{city, degraded, cache_hit}` for a
    /// request that produced a response (cache hit or freshly computed).
    pub fn record_request(&self, city: &str, degraded: bool, cache_hit: bool) {
        self.requests_total
            .with_label_values(&[city, bool_label(degraded), bool_label(cache_hit)])
            .inc();
    }

    /// Increments `route_failures_total{city, reason}`. Per the resolved open
    /// question in the design notes, this fires only when the response itself
    /// is an error (e.g. `unreachable`), never on a successful degraded
    /// fallback or timeout.
    pub fn record_failure(&self, city: &str, reason: &str) {
        self.failures_total.with_label_values(&[city, reason]).inc();
    }

    pub fn observe_duration(&self, city: &str, seconds: f64) {
        self.route_duration_seconds.with_label_values(&[city]).observe(seconds);
    }

    pub fn observe_expanded(&self, city: &str, expanded: usize) {
        self.astar_expanded_nodes
            .with_label_values(&[city])
            .observe(expanded as f64);
    }
}
