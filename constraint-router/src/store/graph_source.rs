use constraint_router_core::model::network::GraphBundle;

use super::store_error::StoreError;

/// Abstraction over "load a city's full graph from the relational store",
/// implemented by [`super::postgres::PostgresGraphSource`] in production and
/// by an in-memory fake in tests, so [`super::graph_cache::GraphCache`]'s
/// single-flight behavior can be exercised without a live Postgres instance.
pub trait GraphSource: Send + Sync {
    fn load_city(&self, city: &str) -> impl std::future::Future<Output = Result<GraphBundle, StoreError>> + Send;
}
