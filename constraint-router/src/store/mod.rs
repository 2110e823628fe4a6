pub mod graph_cache;
pub mod graph_source;
pub mod postgres;
pub mod store_error;

pub use graph_cache::GraphCache;
pub use graph_source::GraphSource;
pub use postgres::PostgresGraphSource;
pub use store_error::StoreError;
