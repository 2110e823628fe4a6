use crate::model::network::NodeIdx;

/// Outcome of a single search run: either a deadline-bounded A* pass or the
/// unconstrained Dijkstra fallback.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Ordered source-to-terminus node sequence. Empty if no improvement over
    /// the source was ever made.
    pub path_nodes: Vec<NodeIdx>,
    /// Sum of edge weights along `path_nodes`.
    pub total_cost: f64,
    /// Number of pop operations performed.
    pub expanded_count: usize,
    /// `true` iff the search did not reach the target.
    pub degraded: bool,
    /// `""` on success, `"timeout"` on deadline breach, `"no_path"` if the
    /// queue drained without reaching the target.
    pub reason: &'static str,
}

impl SearchOutcome {
    pub fn success(path_nodes: Vec<NodeIdx>, total_cost: f64, expanded_count: usize) -> Self {
        SearchOutcome {
            path_nodes,
            total_cost,
            expanded_count,
            degraded: false,
            reason: "",
        }
    }

    pub fn no_path(expanded_count: usize) -> Self {
        SearchOutcome {
            path_nodes: Vec::new(),
            total_cost: f64::INFINITY,
            expanded_count,
            degraded: true,
            reason: "no_path",
        }
    }

    pub fn timeout(path_nodes: Vec<NodeIdx>, total_cost: f64, expanded_count: usize) -> Self {
        SearchOutcome {
            path_nodes,
            total_cost,
            expanded_count,
            degraded: true,
            reason: "timeout",
        }
    }
}
