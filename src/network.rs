//! Serde-loadable network description and end-to-end route requests.
//!
//! A [`Network`] lists named nodes with coordinates and, optionally,
//! explicit edges. Without explicit edges every pair of nodes is connected
//! by its great-circle distance. Closures are applied per request when the
//! working graph is built.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, RoutingError};
use crate::graph::{Exclusions, Graph};
use crate::haversine::Coordinate;
use crate::sequencer::{RoutePlan, SequencerOptions, optimize_route_with};
use crate::traits::{NoProgress, ProgressReporter};

/// An explicit connection between two named nodes.
///
/// A missing weight is derived from the endpoints' coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeEntry {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl EdgeEntry {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub nodes: BTreeMap<String, Coordinate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<EdgeEntry>,
}

/// A routing request against a [`Network`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub stops: Vec<String>,
    /// Node pairs whose edge is closed for this request.
    #[serde(default)]
    pub excluded_edges: Vec<(String, String)>,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            ..Self::default()
        }
    }

    pub fn stop(mut self, stop: impl Into<String>) -> Self {
        self.stops.push(stop.into());
        self
    }

    pub fn close(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.excluded_edges.push((a.into(), b.into()));
        self
    }

    pub fn exclusions(&self) -> Exclusions<String> {
        self.excluded_edges.iter().cloned().collect()
    }
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        self.nodes.insert(name.into(), Coordinate::new(lat, lon));
        self
    }

    pub fn edge(mut self, edge: EdgeEntry) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn coordinate(&self, name: &str) -> Result<Coordinate> {
        self.nodes
            .get(name)
            .copied()
            .ok_or_else(|| RoutingError::UnknownNode(name.to_string()))
    }

    /// Every unordered pair of node names, in sorted order. These are the
    /// edges a caller can offer as closures on a fully connected network.
    pub fn node_pairs(&self) -> Vec<(String, String)> {
        let names: Vec<&String> = self.nodes.keys().collect();
        let mut pairs = Vec::with_capacity(names.len() * names.len().saturating_sub(1) / 2);
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                pairs.push(((*a).clone(), (*b).clone()));
            }
        }
        pairs
    }

    /// Builds a working graph with `exclusions` left out.
    ///
    /// Every node is present even if all of its edges are closed.
    pub fn build_graph(&self, exclusions: &Exclusions<String>) -> Result<Graph<String>> {
        let mut graph = Graph::new();
        for name in self.nodes.keys() {
            graph.add_node(name.clone());
        }

        if self.edges.is_empty() {
            for (a, b) in self.node_pairs() {
                if exclusions.contains(&a, &b) {
                    continue;
                }
                let weight = self.coordinate(&a)?.distance_to(&self.coordinate(&b)?);
                graph.try_add_edge(a, b, weight)?;
            }
        } else {
            for edge in &self.edges {
                let from = self.coordinate(&edge.from)?;
                let to = self.coordinate(&edge.to)?;
                if exclusions.contains(&edge.from, &edge.to) {
                    continue;
                }
                let weight = edge.weight.unwrap_or_else(|| from.distance_to(&to));
                graph.try_add_edge(edge.from.clone(), edge.to.clone(), weight)?;
            }
        }

        if !exclusions.is_empty() {
            info!(
                closed = exclusions.len(),
                edges = graph.edge_count(),
                "built working graph with closures"
            );
        }

        Ok(graph)
    }

    pub fn plan(&self, request: &RouteRequest, options: &SequencerOptions) -> Result<RoutePlan<String>> {
        self.plan_with_progress(request, options, &mut NoProgress)
    }

    /// Validates `request`, builds its working graph and sequences the stops.
    pub fn plan_with_progress<P: ProgressReporter>(
        &self,
        request: &RouteRequest,
        options: &SequencerOptions,
        progress: &mut P,
    ) -> Result<RoutePlan<String>> {
        for name in [&request.start, &request.end].into_iter().chain(&request.stops) {
            self.coordinate(name)?;
        }

        let graph = self.build_graph(&request.exclusions())?;
        optimize_route_with(&graph, &request.start, &request.end, &request.stops, options, progress)
    }
}
