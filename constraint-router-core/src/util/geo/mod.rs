pub mod haversine;
pub mod nearest;

pub use haversine::haversine_distance_meters;
pub use nearest::nearest_node;
