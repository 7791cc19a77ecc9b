//! Core traits for the routing engine.
//!
//! These are intentionally minimal. Apps can key nodes by any ordered,
//! hashable, printable type.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Identifier for graph nodes.
///
/// `Ord` keeps adjacency iteration and heap tie-breaking deterministic.
/// `Display` is used when a node has to be named in an error.
pub trait NodeId: Clone + Eq + Ord + Hash + Debug + Display {}

impl<T> NodeId for T where T: Clone + Eq + Ord + Hash + Debug + Display {}

/// Receives fractional progress from long-running computations.
///
/// Called after each evaluated unit of work with `(completed, total)`.
/// Implementations must not assume they are called for every unit.
pub trait ProgressReporter {
    fn report(&mut self, completed: usize, total: usize);
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _completed: usize, _total: usize) {}
}

impl<F> ProgressReporter for F
where
    F: FnMut(usize, usize),
{
    fn report(&mut self, completed: usize, total: usize) {
        self(completed, total)
    }
}
