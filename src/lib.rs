//! route-planner core
//!
//! Shortest-path and multi-stop route sequencing over small named graphs,
//! with edge closures for what-if simulation.

pub mod traits;
pub mod error;
pub mod haversine;
pub mod graph;
pub mod path;
pub mod dijkstra;
pub mod sequencer;
pub mod network;

pub use dijkstra::dijkstra;
pub use error::{Result, RoutingError};
pub use graph::{Exclusions, Graph};
pub use haversine::{great_circle_distance, Coordinate};
pub use network::{Network, RouteRequest};
pub use path::Path;
pub use sequencer::{optimize_route, optimize_route_with, RoutePlan, SequencerOptions};
