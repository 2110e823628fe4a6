mod edge;
mod graph;
mod network_error;
mod node;

pub use edge::{Edge, EdgeId};
pub use graph::GraphBundle;
pub use network_error::NetworkError;
pub use node::{Node, NodeId, NodeIdx};
