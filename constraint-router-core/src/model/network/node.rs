use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A node's stable public identity: its OpenStreetMap identifier. Opaque to the
/// engine beyond equality and hashing; callers never derive meaning from its value.
#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(pub i64);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node's position in the graph's dense adjacency and coordinate arrays.
/// Distinct from [`NodeId`] so the search's hot loop indexes slices directly
/// instead of hashing an OSM identifier on every pop.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeIdx(pub usize);

impl Display for NodeIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node record as read from the relational store: its OSM id and WGS84 position.
#[derive(Copy, Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    /// longitude, degrees
    pub x: f64,
    /// latitude, degrees
    pub y: f64,
}
