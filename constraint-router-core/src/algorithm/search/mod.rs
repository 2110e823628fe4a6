pub mod astar;
pub mod dijkstra;
pub mod result;

pub use astar::astar;
pub use dijkstra::dijkstra;
pub use result::SearchOutcome;
