use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::config::AppConfig;
use crate::types::RouteResult;

/// Result cache backed by Redis, keyed by the request fingerprint, with a
/// fixed 3600s TTL enforced by Redis `SET ... EX` rather than application-side
/// bookkeeping. A Redis outage never fails a request: every fallible operation
/// here logs a warning and degrades to a miss (`get`) or a no-op (`set`).
pub enum RouteCache {
    Redis(ConnectionManager),
    /// Used when Redis could not be reached at startup. Every request behaves
    /// as a permanent cache miss; the service still serves traffic.
    Disabled,
}

/// TTL for a cached route, in seconds.
pub const RESULT_TTL_SECS: u64 = 3600;

impl RouteCache {
    pub async fn connect(config: &AppConfig) -> Self {
        let url = format!(
            "redis://{}:{}/{}",
            config.redis_host, config.redis_port, config.redis_db
        );
        match redis::Client::open(url) {
            Ok(client) => match ConnectionManager::new(client).await {
                Ok(manager) => RouteCache::Redis(manager),
                Err(e) => {
                    log::warn!("redis unreachable at startup, result cache disabled: {e}");
                    RouteCache::Disabled
                }
            },
            Err(e) => {
                log::warn!("invalid redis configuration, result cache disabled: {e}");
                RouteCache::Disabled
            }
        }
    }

    pub async fn get(&self, fingerprint: &str) -> Option<RouteResult> {
        let manager = match self {
            RouteCache::Redis(m) => m,
            RouteCache::Disabled => return None,
        };
        let key = crate::fingerprint::cache_key(fingerprint);
        let mut conn = manager.clone();
        let raw: Option<String> = match conn.get(&key).await {
            Ok(v) => v,
            Err(e) => {
                log::warn!("redis GET failed, treating as cache miss: {e}");
                return None;
            }
        };
        raw.and_then(|s| match serde_json::from_str(&s) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("cached value for {key} was not valid JSON, treating as miss: {e}");
                None
            }
        })
    }

    pub async fn set(&self, fingerprint: &str, value: &RouteResult) {
        let manager = match self {
            RouteCache::Redis(m) => m,
            RouteCache::Disabled => return,
        };
        let key = crate::fingerprint::cache_key(fingerprint);
        let body = match serde_json::to_string(value) {
            Ok(b) => b,
            Err(e) => {
                log::warn!("failed to serialize route result for caching: {e}");
                return;
            }
        };
        let mut conn = manager.clone();
        if let Err(e) = conn.set_ex::<_, _, ()>(&key, body, RESULT_TTL_SECS).await {
            log::warn!("redis SET failed, result will not be cached: {e}");
        }
    }
}
