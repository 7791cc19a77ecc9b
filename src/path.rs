//! A concrete traversal through the graph.
//!
//! An empty path is how the shortest-path engine reports that no route
//! exists, whether the endpoints are unknown or simply disconnected.

use serde::{Deserialize, Serialize};

use crate::traits::NodeId;

/// Start-to-end node sequence with its total distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path<N: NodeId> {
    nodes: Vec<N>,
    distance: f64,
}

impl<N: NodeId> Path<N> {
    pub fn new(nodes: Vec<N>, distance: f64) -> Self {
        Self { nodes, distance }
    }

    /// The "no route" result: no nodes, distance 0.
    pub fn not_found() -> Self {
        Self {
            nodes: Vec::new(),
            distance: 0.0,
        }
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<&N> {
        self.nodes.first()
    }

    pub fn end(&self) -> Option<&N> {
        self.nodes.last()
    }

    /// Consumes the path and returns the owned node sequence.
    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }

    /// Appends `next` to this path. The junction node is kept once, so
    /// `next` must start where `self` ends.
    pub fn extend_with(&mut self, next: &Path<N>) {
        let skip = usize::from(!self.nodes.is_empty());
        self.nodes.extend(next.nodes.iter().skip(skip).cloned());
        self.distance += next.distance;
    }
}
