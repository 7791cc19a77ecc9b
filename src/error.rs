//! Error types for graph construction and route planning.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    #[error("invalid weight {weight} on edge {from} - {to}: must be finite and non-negative")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("invalid route request: {0}")]
    InvalidRequest(String),

    /// Every visiting order had at least one unreachable leg.
    #[error("no feasible route from {start} to {end}")]
    NoFeasibleRoute { start: String, end: String },
}

pub type Result<T> = std::result::Result<T, RoutingError>;
