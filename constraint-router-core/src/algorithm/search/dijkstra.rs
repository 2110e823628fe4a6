use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use ordered_float::OrderedFloat;

use super::result::SearchOutcome;
use crate::model::network::{GraphBundle, NodeIdx};
use crate::util::priority_queue::InternalPriorityQueue;

/// Unconstrained shortest path search weighted purely by `travel_time`, used
/// as the fallback when a deadline-bounded [`super::astar::astar`] run drains
/// its open set without reaching the target.
///
/// Never degrades on its own account: the returned outcome's `degraded` flag
/// always reflects whether the target was reached, never a deadline, since
/// this search runs to completion.
pub fn dijkstra(graph: &GraphBundle, source: NodeIdx, target: NodeIdx) -> SearchOutcome {
    if source == target {
        return SearchOutcome::success(vec![source], 0.0, 0);
    }

    let mut g_score: HashMap<NodeIdx, f64> = HashMap::new();
    let mut came_from: HashMap<NodeIdx, NodeIdx> = HashMap::new();
    let mut closed: HashSet<NodeIdx> = HashSet::new();
    let mut open: InternalPriorityQueue<NodeIdx, Reverse<OrderedFloat<f64>>> =
        InternalPriorityQueue::default();

    g_score.insert(source, 0.0);
    open.push(source, Reverse(OrderedFloat(0.0)));

    let mut expanded_count = 0usize;

    while let Some((current, _)) = open.pop() {
        expanded_count += 1;

        if current == target {
            let mut path = vec![current];
            let mut node = current;
            while let Some(&prev) = came_from.get(&node) {
                path.push(prev);
                node = prev;
            }
            path.reverse();
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

            let tentative_g = current_g + edge.travel_time;
            let improves = match g_score.get(&successor) {
                Some(&existing_g) => tentative_g < existing_g,
                None => true,
            };
            if improves {
                g_score.insert(successor, tentative_g);
                came_from.insert(successor, current);
                open.push(successor, Reverse(OrderedFloat(tentative_g)));
            }
        }
    }

    SearchOutcome::no_path(expanded_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::{Edge, Node, NodeId};

    fn two_route_graph() -> GraphBundle {
        let nodes = vec![
            Node { id: NodeId(1), x: 0.0, y: 0.0 },
            Node { id: NodeId(2), x: 0.0, y: 0.001 },
            Node { id: NodeId(3), x: 0.0, y: 0.002 },
        ];
        let mk = |tt: f64| Edge {
            src: NodeIdx(0),
            dst: NodeIdx(0),
            length: tt * 8.0,
            travel_time: tt,
            highway: "residential".to_string(),
            lit: true,
            temp_risk: 0.9,
            security_risk: 0.9,
        };
        let edges = vec![
            (NodeId(1), NodeId(3), mk(50.0)),
            (NodeId(1), NodeId(2), mk(5.0)),
            (NodeId(2), NodeId(3), mk(5.0)),
        ];
        GraphBundle::new(nodes, edges).unwrap()
    }

    #[test]
    fn ignores_risk_and_picks_lowest_travel_time() {
        let graph = two_route_graph();
        let src = graph.node_idx(NodeId(1)).unwrap();
        let dst = graph.node_idx(NodeId(3)).unwrap();
        let outcome = dijkstra(&graph, src, dst);
        assert_eq!(outcome.reason, "");
        assert!(!outcome.degraded);
        assert!((outcome.total_cost - 10.0).abs() < 1e-9);
        assert_eq!(outcome.path_nodes.len(), 3);
    }

    #[test]
    fn no_path_when_unreachable() {
        let nodes = vec![
            Node { id: NodeId(1), x: 0.0, y: 0.0 },
            Node { id: NodeId(2), x: 0.0, y: 0.001 },
        ];
        let graph = GraphBundle::new(nodes, Vec::new()).unwrap();
        let src = graph.node_idx(NodeId(1)).unwrap();
        let dst = graph.node_idx(NodeId(2)).unwrap();
        let outcome = dijkstra(&graph, src, dst);
        assert_eq!(outcome.reason, "no_path");
        assert!(outcome.degraded);
    }
}
