use std::net::SocketAddr;

use serde::Deserialize;

/// Process-wide configuration, populated once at startup from environment
/// variables. A parsing failure here is fatal: the process must not begin
/// serving traffic with a configuration it cannot make sense of.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_db_host")]
    pub db_host: String,
    #[serde(default = "default_db_port")]
    pub db_port: u16,
    #[serde(default = "default_db_name")]
    pub db_name: String,
    #[serde(default = "default_db_user")]
    pub db_user: String,
    #[serde(default = "default_db_password")]
    pub db_password: String,

    #[serde(default = "default_redis_host")]
    pub redis_host: String,
    #[serde(default = "default_redis_port")]
    pub redis_port: u16,
    #[serde(default = "default_redis_db")]
    pub redis_db: i64,

    #[serde(default = "default_city")]
    pub default_city: String,
    #[serde(default = "default_deadline_ms")]
    pub route_deadline_ms: u64,

    #[serde(default = "default_http_bind_addr")]
    pub http_bind_addr: SocketAddr,
}

fn default_db_host() -> String {
    "localhost".to_string()
}
fn default_db_port() -> u16 {
    5432
}
fn default_db_name() -> String {
    "routes".to_string()
}
fn default_db_user() -> String {
    "routeuser".to_string()
}
fn default_db_password() -> String {
    "routepass".to_string()
}
fn default_redis_host() -> String {
    "localhost".to_string()
}
fn default_redis_port() -> u16 {
    6379
}
fn default_redis_db() -> i64 {
    0
}
fn default_city() -> String {
    "bogota".to_string()
}
fn default_deadline_ms() -> u64 {
    3000
}
fn default_http_bind_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default bind address")
}

#[derive(thiserror::Error, Debug)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(String);

impl AppConfig {
    /// Loads configuration from the process environment. Every field has a
    /// default matching the service's documented defaults; an explicitly set
    /// variable that fails to parse (a non-numeric `DB_PORT`, an unparsable
    /// `HTTP_BIND_ADDR`) is a fatal startup error, not a fallback to default.
    pub fn from_env() -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ConfigError(e.to_string()))
    }
}
