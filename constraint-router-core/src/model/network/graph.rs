use std::collections::HashMap;

use super::{Edge, EdgeId, NetworkError, Node, NodeId, NodeIdx};

/// A city's road network, loaded once and shared read-only across every request
/// that routes within that city. `node_ids` and `coords` are parallel arrays: for
/// any valid `NodeIdx(i)`, `node_ids[i]` and `coords[i]` describe the same node.
///
/// # Performance
///
/// All lookups by `NodeIdx` are array indexing, O(1). Lookup by the public
/// `NodeId` goes through `id_index`, a single hash lookup.
#[derive(Debug)]
pub struct GraphBundle {
    node_ids: Box<[NodeId]>,
    /// `(lat, lon)` in degrees, parallel to `node_ids`.
    coords: Box<[(f64, f64)]>,
    edges: Box<[Edge]>,
    /// outgoing edge ids per node, indexed by `NodeIdx`.
    adj: Box<[Vec<EdgeId>]>,
    id_index: HashMap<NodeId, NodeIdx>,
}

impl GraphBundle {
    /// Builds a graph bundle from loaded nodes and edges. Nodes are assigned dense
    /// indices in the order given; edges reference nodes by their public [`NodeId`]
    /// and are resolved to [`NodeIdx`] here, failing closed if an edge references a
    /// node absent from `nodes`.
    pub fn new(nodes: Vec<Node>, raw_edges: Vec<(NodeId, NodeId, Edge)>) -> Result<Self, NetworkError> {
        let mut node_ids = Vec::with_capacity(nodes.len());
        let mut coords = Vec::with_capacity(nodes.len());
        let mut id_index = HashMap::with_capacity(nodes.len());

        for (idx, node) in nodes.into_iter().enumerate() {
            let idx = NodeIdx(idx);
            node_ids.push(node.id);
            coords.push((node.y, node.x));
            if id_index.insert(node.id, idx).is_some() {
                return Err(NetworkError::DatasetError(format!("duplicate node id {}", node.id)));
            }
        }

        let mut adj: Vec<Vec<EdgeId>> = vec![Vec::new(); node_ids.len()];
        let mut edges = Vec::with_capacity(raw_edges.len());
        for (src_id, dst_id, mut edge) in raw_edges {
            let src = *id_index
                .get(&src_id)
                .ok_or(NetworkError::NodeNotFound(src_id))?;
            let dst = *id_index
                .get(&dst_id)
                .ok_or(NetworkError::NodeNotFound(dst_id))?;
            edge.src = src;
            edge.dst = dst;

            let edge_id = EdgeId(edges.len());
            adj[src.0].push(edge_id);
            edges.push(edge);
        }

        Ok(GraphBundle {
            node_ids: node_ids.into_boxed_slice(),
            coords: coords.into_boxed_slice(),
            edges: edges.into_boxed_slice(),
            adj: adj.into_boxed_slice(),
            id_index,
        })
    }

    pub fn n_nodes(&self) -> usize {
        self.node_ids.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn node_id(&self, idx: NodeIdx) -> Option<NodeId> {
        self.node_ids.get(idx.0).copied()
    }

    /// Coordinate as `(lat, lon)` in degrees.
    pub fn coord(&self, idx: NodeIdx) -> Option<(f64, f64)> {
        self.coords.get(idx.0).copied()
    }

    pub fn all_coords(&self) -> &[(f64, f64)] {
        &self.coords
    }

    pub fn node_idx(&self, id: NodeId) -> Option<NodeIdx> {
        self.id_index.get(&id).copied()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// Outbound edge ids leaving `node`, empty when `node` has no out edges or is
    /// out of range.
    pub fn out_edges(&self, node: NodeIdx) -> &[EdgeId] {
        self.adj.get(node.0).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(src: NodeId, dst: NodeId) -> (NodeId, NodeId, Edge) {
        (
            src,
            dst,
            Edge {
                src: NodeIdx(0),
                dst: NodeIdx(0),
                length: 100.0,
                travel_time: 12.5,
                highway: "residential".to_string(),
                lit: true,
                temp_risk: 0.3,
                security_risk: 0.3,
            },
        )
    }

    #[test]
    fn node_ids_and_coords_stay_parallel() {
        let nodes = vec![
            Node { id: NodeId(10), x: -74.1, y: 4.65 },
            Node { id: NodeId(20), x: -74.2, y: 4.70 },
        ];
        let bundle = GraphBundle::new(nodes, Vec::new()).unwrap();
        let idx = bundle.node_idx(NodeId(20)).unwrap();
        assert_eq!(bundle.node_id(idx), Some(NodeId(20)));
        assert_eq!(bundle.coord(idx), Some((4.70, -74.2)));
    }

    #[test]
    fn rejects_duplicate_node_ids() {
        let nodes = vec![
            Node { id: NodeId(1), x: 0.0, y: 0.0 },
            Node { id: NodeId(1), x: 1.0, y: 1.0 },
        ];
        assert!(GraphBundle::new(nodes, Vec::new()).is_err());
    }

    #[test]
    fn rejects_edge_referencing_unknown_node() {
        let nodes = vec![Node { id: NodeId(1), x: 0.0, y: 0.0 }];
        let edges = vec![edge(NodeId(1), NodeId(999))];
        assert!(GraphBundle::new(nodes, edges).is_err());
    }

    #[test]
    fn out_edges_resolved_to_dense_indices() {
        let nodes = vec![
            Node { id: NodeId(1), x: 0.0, y: 0.0 },
            Node { id: NodeId(2), x: 0.0, y: 0.001 },
        ];
        let edges = vec![edge(NodeId(1), NodeId(2))];
        let bundle = GraphBundle::new(nodes, edges).unwrap();
        let src = bundle.node_idx(NodeId(1)).unwrap();
        let dst = bundle.node_idx(NodeId(2)).unwrap();
        let out = bundle.out_edges(src);
        assert_eq!(out.len(), 1);
        let e = bundle.edge(out[0]).unwrap();
        assert_eq!(e.src, src);
        assert_eq!(e.dst, dst);
    }
}
