pub mod constraints;
pub mod cost;
pub mod network;

pub use constraints::ConstraintBundle;
pub use cost::edge_cost;
