use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

use ordered_float::OrderedFloat;

use super::result::SearchOutcome;
use crate::model::constraints::ConstraintBundle;
use crate::model::cost::edge_cost;
use crate::model::network::{GraphBundle, NodeIdx};
use crate::util::geo::haversine_distance_meters;
use crate::util::priority_queue::InternalPriorityQueue;

/// Free-flow speed assumed by the search heuristic, metres per second (60 km/h).
const FREE_FLOW_SPEED_MPS: f64 = 16.6667;

fn heuristic(graph: &GraphBundle, node: NodeIdx, target_coord: (f64, f64)) -> f64 {
    let (lat, lon) = graph
        .coord(node)
        .expect("heuristic queried for a node outside the graph bundle");
    haversine_distance_meters(lat, lon, target_coord.0, target_coord.1) / FREE_FLOW_SPEED_MPS
}

fn reconstruct_path(came_from: &HashMap<NodeIdx, NodeIdx>, mut node: NodeIdx) -> Vec<NodeIdx> {
    let mut path = vec![node];
    while let Some(&prev) = came_from.get(&node) {
        path.push(prev);
        node = prev;
    }
    path.reverse();
    path
}

/// Deadline-bounded A* search from `source` to `target` over `graph`, weighted
/// by [`edge_cost`] under `constraints`.
///
/// Stops as soon as `deadline_sec` of wall-clock time has elapsed since the
/// call began, reporting a degraded, best-effort path to the most promising
/// node seen so far rather than failing outright. Returns `reason="no_path"`
/// when the open set is exhausted before the target is reached within the
/// deadline.
pub fn astar(
    graph: &GraphBundle,
    source: NodeIdx,
    target: NodeIdx,
    constraints: &ConstraintBundle,
    deadline_sec: f64,
) -> SearchOutcome {
    let started = Instant::now();
    let target_coord = graph
        .coord(target)
        .expect("astar called with a target outside the graph bundle");

    if source == target {
        return SearchOutcome::success(vec![source], 0.0, 0);
    }

    let mut g_score: HashMap<NodeIdx, f64> = HashMap::new();
    let mut came_from: HashMap<NodeIdx, NodeIdx> = HashMap::new();
    let mut closed: HashSet<NodeIdx> = HashSet::new();
    let mut open: InternalPriorityQueue<NodeIdx, Reverse<OrderedFloat<f64>>> =
        InternalPriorityQueue::default();

    g_score.insert(source, 0.0);
    let source_f = heuristic(graph, source, target_coord);
    open.push(source, Reverse(OrderedFloat(source_f)));

    let mut best_node = source;
    let mut best_f = source_f;

    let mut expanded_count = 0usize;

    while let Some((current, _)) = open.pop() {
        if started.elapsed().as_secs_f64() > deadline_sec {
            log::debug!(
                "astar deadline of {deadline_sec}s exceeded after expanding {expanded_count} nodes, degrading to best-so-far"
            );
            return if best_node == source {
                SearchOutcome::timeout(Vec::new(), f64::INFINITY, expanded_count)
            } else {
                let path = reconstruct_path(&came_from, best_node);
                SearchOutcome::timeout(path, g_score[&best_node], expanded_count)
            };
        }

        expanded_count += 1;

        if current == target {
            let path = reconstruct_path(&came_from, current);
            return SearchOutcome::success(path, g_score[&current], expanded_count);
        }

        if closed.contains(&current) {
            continue;
        }
        closed.insert(current);

        let current_g = g_score[&current];
        for &edge_id in graph.out_edges(current) {
            let edge = graph.edge(edge_id).expect("adjacency references a missing edge");
            let successor = edge.dst;
            if closed.contains(&successor) {
                continue;
            }

            let tentative_g = current_g + edge_cost(edge, constraints);
            let improves = match g_score.get(&successor) {
                Some(&existing_g) => tentative_g < existing_g,
                None => true,
            };
            if improves {
                g_score.insert(successor, tentative_g);
                came_from.insert(successor, current);
                let f = tentative_g + heuristic(graph, successor, target_coord);
                open.push(successor, Reverse(OrderedFloat(f)));
                if f < best_f {
                    best_f = f;
                    best_node = successor;
                }
            }
        }
    }

    SearchOutcome::no_path(expanded_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::{Edge, Node, NodeId};

    fn line_graph() -> GraphBundle {
        let nodes = vec![
            Node { id: NodeId(1), x: 0.0, y: 0.0 },
            Node { id: NodeId(2), x: 0.0, y: 0.001 },
            Node { id: NodeId(3), x: 0.0, y: 0.002 },
        ];
        let edges = vec![
            (
                NodeId(1),
                NodeId(2),
                Edge {
                    src: NodeIdx(0),
                    dst: NodeIdx(0),
                    length: 111.0,
                    travel_time: 10.0,
                    highway: "residential".to_string(),
                    lit: true,
                    temp_risk: 0.1,
                    security_risk: 0.1,
                },
            ),
            (
                NodeId(2),
                NodeId(3),
                Edge {
                    src: NodeIdx(0),
                    dst: NodeIdx(0),
                    length: 111.0,
                    travel_time: 10.0,
                    highway: "residential".to_string(),
                    lit: true,
                    temp_risk: 0.1,
                    security_risk: 0.1,
                },
            ),
        ];
        GraphBundle::new(nodes, edges).unwrap()
    }

    #[test]
    fn finds_shortest_path_with_generous_deadline() {
        let graph = line_graph();
        let src = graph.node_idx(NodeId(1)).unwrap();
        let dst = graph.node_idx(NodeId(3)).unwrap();
        let outcome = astar(&graph, src, dst, &ConstraintBundle::default(), 5.0);
        assert_eq!(outcome.reason, "");
        assert!(!outcome.degraded);
        assert_eq!(outcome.path_nodes.len(), 3);
        assert!((outcome.total_cost - 20.0).abs() < 1e-9);
    }

    #[test]
    fn source_equals_target_is_zero_cost() {
        let graph = line_graph();
        let src = graph.node_idx(NodeId(1)).unwrap();
        let outcome = astar(&graph, src, src, &ConstraintBundle::default(), 5.0);
        assert_eq!(outcome.path_nodes, vec![src]);
        assert_eq!(outcome.total_cost, 0.0);
        assert!(!outcome.degraded);
    }

    #[test]
    fn reports_no_path_when_target_unreachable() {
        let nodes = vec![
            Node { id: NodeId(1), x: 0.0, y: 0.0 },
            Node { id: NodeId(2), x: 0.0, y: 0.001 },
        ];
        let graph = GraphBundle::new(nodes, Vec::new()).unwrap();
        let src = graph.node_idx(NodeId(1)).unwrap();
        let dst = graph.node_idx(NodeId(2)).unwrap();
        let outcome = astar(&graph, src, dst, &ConstraintBundle::default(), 5.0);
        assert_eq!(outcome.reason, "no_path");
        assert!(outcome.degraded);
        assert!(outcome.path_nodes.is_empty());
    }

    #[test]
    fn zero_deadline_degrades_immediately() {
        let graph = line_graph();
        let src = graph.node_idx(NodeId(1)).unwrap();
        let dst = graph.node_idx(NodeId(3)).unwrap();
        let outcome = astar(&graph, src, dst, &ConstraintBundle::default(), 0.0);
        assert_eq!(outcome.reason, "timeout");
        assert!(outcome.degraded);
    }
}
