use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;

use constraint_router_core::model::network::GraphBundle;

use super::graph_source::GraphSource;
use super::store_error::StoreError;

/// Process-wide, per-city graph cache. Bundles are loaded lazily on first
/// request for a city and retained for the process lifetime; picking up new
/// graph data requires a process restart. A `DashMap` entry holds a
/// `OnceCell` rather than the bundle itself: concurrent callers for a city
/// not yet loaded share the one in-flight `OnceCell::get_or_try_init` call
/// instead of racing independent loads, and a failed load leaves the cell
/// empty so the next caller retries rather than caching the failure (a
/// bundle is never published on a store error).
pub struct GraphCache<S: GraphSource> {
    source: S,
    cells: DashMap<String, Arc<OnceCell<Arc<GraphBundle>>>>,
}

impl<S: GraphSource> GraphCache<S> {
    pub fn new(source: S) -> Self {
        GraphCache {
            source,
            cells: DashMap::new(),
        }
    }

    pub async fn load(&self, city: &str) -> Result<Arc<GraphBundle>, StoreError> {
        // Clone the cell out from under the shard lock before awaiting the
        // load so other cities' entries are never blocked on this one.
        let cell = self
            .cells
            .entry(city.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        cell.get_or_try_init(|| async { self.source.load_city(city).await.map(Arc::new) })
            .await
            .map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use constraint_router_core::model::network::{Node, NodeId};

    use super::*;

    struct CountingSource {
        calls: AtomicUsize,
        fail_until: usize,
    }

    impl GraphSource for CountingSource {
        async fn load_city(&self, city: &str) -> Result<GraphBundle, StoreError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if city == "atlantis" {
                return Err(StoreError::CityUnknown(city.to_string()));
            }
            if call < self.fail_until {
                return Err(StoreError::Unavailable("transient".to_string()));
            }
            Ok(GraphBundle::new(vec![Node { id: NodeId(1), x: 0.0, y: 0.0 }], Vec::new()).unwrap())
        }
    }

    #[tokio::test]
    async fn loads_once_and_caches_across_calls() {
        let source = CountingSource {
            calls: AtomicUsize::new(0),
            fail_until: 0,
        };
        let cache = GraphCache::new(source);

        let first = cache.load("bogota").await.unwrap();
        let second = cache.load("bogota").await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_load_is_not_cached_and_retries() {
        let source = CountingSource {
            calls: AtomicUsize::new(0),
            fail_until: 1,
        };
        let cache = GraphCache::new(source);

        assert!(cache.load("bogota").await.is_err());
        assert!(cache.load("bogota").await.is_ok());
        assert_eq!(cache.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unknown_city_surfaces_city_unknown() {
        let source = CountingSource {
            calls: AtomicUsize::new(0),
            fail_until: 0,
        };
        let cache = GraphCache::new(source);

        let err = cache.load("atlantis").await.unwrap_err();
        assert!(matches!(err, StoreError::CityUnknown(_)));
    }
}
