use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use constraint_router::cache::RouteCache;
use constraint_router::config::AppConfig;
use constraint_router::http;
use constraint_router::metrics::Metrics;
use constraint_router::orchestrator::Orchestrator;
use constraint_router::store::{GraphCache, PostgresGraphSource};

#[tokio::main]
async fn main() {
    tracing_log::LogTracer::init().expect("log tracer installs exactly once");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration, refusing to start: {e}");
            std::process::exit(1);
        }
    };

    let bind_addr = config.http_bind_addr;

    let graph_cache = GraphCache::new(PostgresGraphSource::new(&config));
    let route_cache = RouteCache::connect(&config).await;
    let metrics = Metrics::new();

    let orchestrator = Arc::new(Orchestrator::new(config, graph_cache, route_cache, metrics));
    let app = http::router(orchestrator);

    tracing::info!("constraint-router listening on {bind_addr}");
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));
    axum::serve(listener, app).await.expect("server exited unexpectedly");
}
