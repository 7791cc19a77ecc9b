//! Test fixtures for route-planner.
//!
//! Provides realistic test data including:
//! - Jember regency (East Java) distribution points
//! - Small hand-weighted graphs for exact-distance assertions

pub mod jember_locations;

pub use jember_locations::*;

use route_planner::graph::Graph;

/// The three-node graph used throughout: A-B=5, B-C=5, A-C=20.
pub fn triangle() -> Graph<String> {
    let mut graph = Graph::new();
    graph.add_edge("A".to_string(), "B".to_string(), 5.0);
    graph.add_edge("B".to_string(), "C".to_string(), 5.0);
    graph.add_edge("A".to_string(), "C".to_string(), 20.0);
    graph
}

/// Sparse hand-weighted road network with a dead-end spur and one
/// isolated node.
pub fn road_network() -> Graph<String> {
    let edges = [
        ("depot", "north", 4.0),
        ("depot", "east", 7.0),
        ("depot", "south", 3.5),
        ("north", "east", 2.0),
        ("north", "ridge", 6.0),
        ("east", "harbor", 5.0),
        ("south", "harbor", 9.0),
        ("south", "mill", 2.5),
        ("mill", "harbor", 4.0),
        ("ridge", "harbor", 3.0),
        ("harbor", "spur", 1.5),
    ];

    let mut graph = Graph::new();
    for (a, b, weight) in edges {
        graph.add_edge(a.to_string(), b.to_string(), weight);
    }
    graph.add_node("island".to_string());
    graph
}

pub fn s(name: &str) -> String {
    name.to_string()
}
