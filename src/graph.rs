//! Undirected weighted graph over named nodes.
//!
//! Closures are never stored on a graph. A closed edge is modelled by
//! building a fresh working graph that leaves it out, see [`Graph::without`]
//! and [`Graph::from_edges`].

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, RoutingError};
use crate::traits::NodeId;

/// Adjacency-list graph with symmetric edge weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph<N: NodeId> {
    adjacency: BTreeMap<N, BTreeMap<N, f64>>,
}

impl<N: NodeId> Default for Graph<N> {
    fn default() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }
}

impl<N: NodeId> Graph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a working graph from `(a, b, weight)` triples, skipping any
    /// pair listed in `exclusions`.
    pub fn from_edges<I>(edges: I, exclusions: &Exclusions<N>) -> Self
    where
        I: IntoIterator<Item = (N, N, f64)>,
    {
        let mut graph = Self::new();
        for (a, b, weight) in edges {
            if !exclusions.contains(&a, &b) {
                graph.add_edge(a, b, weight);
            }
        }
        graph
    }

    /// Registers a node with no edges. No-op if it already exists.
    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    /// Inserts or overwrites the edge between `a` and `b` in both directions.
    ///
    /// The weight is not validated; use [`Graph::try_add_edge`] for input
    /// that has not been checked already.
    pub fn add_edge(&mut self, a: N, b: N, weight: f64) {
        self.adjacency
            .entry(a.clone())
            .or_default()
            .insert(b.clone(), weight);
        self.adjacency.entry(b).or_default().insert(a, weight);
    }

    /// Like [`Graph::add_edge`], but rejects negative or non-finite weights.
    pub fn try_add_edge(&mut self, a: N, b: N, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(RoutingError::InvalidWeight {
                from: a.to_string(),
                to: b.to_string(),
                weight,
            });
        }
        self.add_edge(a, b, weight);
        Ok(())
    }

    /// Neighbors of `node` with edge weights, in node order. Empty for
    /// unknown or isolated nodes.
    pub fn neighbors<'a>(&'a self, node: &N) -> impl Iterator<Item = (&'a N, f64)> + use<'a, N> {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(neighbor, weight)| (neighbor, *weight)))
    }

    pub fn weight(&self, a: &N, b: &N) -> Option<f64> {
        self.adjacency.get(a).and_then(|edges| edges.get(b)).copied()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        let half_edges: usize = self.adjacency.values().map(BTreeMap::len).sum();
        let self_loops = self
            .adjacency
            .iter()
            .filter(|(node, edges)| edges.contains_key(*node))
            .count();
        (half_edges + self_loops) / 2
    }

    /// Each undirected edge once, as `(a, b, weight)` with `a <= b`.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, f64)> {
        self.adjacency.iter().flat_map(|(a, edges)| {
            edges
                .iter()
                .filter(move |(b, _)| a <= *b)
                .map(move |(b, weight)| (a, b, *weight))
        })
    }

    /// A fresh graph with the same nodes and every edge not in `exclusions`.
    pub fn without(&self, exclusions: &Exclusions<N>) -> Self {
        let mut graph = Self::new();
        for node in self.nodes() {
            graph.add_node(node.clone());
        }
        for (a, b, weight) in self.edges() {
            if !exclusions.contains(a, b) {
                graph.add_edge(a.clone(), b.clone(), weight);
            }
        }
        graph
    }
}

/// Set of unordered node pairs treated as closed for one computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusions<N: NodeId> {
    pairs: BTreeSet<(N, N)>,
}

impl<N: NodeId> Default for Exclusions<N> {
    fn default() -> Self {
        Self {
            pairs: BTreeSet::new(),
        }
    }
}

impl<N: NodeId> Exclusions<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, a: N, b: N) -> bool {
        self.pairs.insert(ordered(a, b))
    }

    pub fn contains(&self, a: &N, b: &N) -> bool {
        let key = if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };
        self.pairs.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(N, N)> {
        self.pairs.iter()
    }
}

impl<N: NodeId> FromIterator<(N, N)> for Exclusions<N> {
    fn from_iter<I: IntoIterator<Item = (N, N)>>(iter: I) -> Self {
        let mut exclusions = Self::new();
        for (a, b) in iter {
            exclusions.insert(a, b);
        }
        exclusions
    }
}

fn ordered<N: Ord>(a: N, b: N) -> (N, N) {
    if a <= b { (a, b) } else { (b, a) }
}
