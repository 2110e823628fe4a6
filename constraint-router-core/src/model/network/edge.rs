use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::node::NodeIdx;

#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
pub struct EdgeId(pub usize);

impl Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single directed edge in the road multigraph. Immutable after load; two edges
/// may share the same `(src, dst)` pair, each relaxed independently by the search.
#[derive(Clone, Debug)]
pub struct Edge {
    pub src: NodeIdx,
    pub dst: NodeIdx,
    /// metres, >= 0
    pub length: f64,
    /// seconds, > 0. Defaults to `length / 8.0` at load time when the row omits it.
    pub travel_time: f64,
    pub highway: String,
    pub lit: bool,
    /// 0.0..=1.0
    pub temp_risk: f64,
    /// 0.0..=1.0
    pub security_risk: f64,
}
