use constraint_router_core::model::network::NetworkError;

/// Errors surfaced by the relational store adapter and the process-wide
/// graph cache that sits in front of it.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("city not registered: {0}")]
    CityUnknown(String),
    #[error("backing store unavailable: {0}")]
    Unavailable(String),
    #[error("graph build failed: {0}")]
    Network(#[from] NetworkError),
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(e: tokio_postgres::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}
