//! Multi-stop route sequencing.
//!
//! Finds the cheapest order to visit a set of stops between a fixed start
//! and end by trying every permutation. This is exhaustive on purpose:
//! `max_stops` keeps `k!` small enough that no heuristic is needed.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{Level, debug, instrument, warn};

use crate::dijkstra::dijkstra;
use crate::error::{Result, RoutingError};
use crate::graph::Graph;
use crate::path::Path;
use crate::traits::{NoProgress, NodeId, ProgressReporter};

/// Default cap on waypoints. 8! = 40320 orders.
pub const DEFAULT_MAX_STOPS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerOptions {
    /// Requests with more stops than this are rejected.
    pub max_stops: usize,
    /// Solve the leg table on the rayon pool.
    pub parallel_legs: bool,
}

impl Default for SequencerOptions {
    fn default() -> Self {
        Self {
            max_stops: DEFAULT_MAX_STOPS,
            parallel_legs: false,
        }
    }
}

impl SequencerOptions {
    pub fn with_max_stops(mut self, max_stops: usize) -> Self {
        self.max_stops = max_stops;
        self
    }

    pub fn with_parallel_legs(mut self, parallel_legs: bool) -> Self {
        self.parallel_legs = parallel_legs;
        self
    }
}

/// The cheapest visiting order found for a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan<N: NodeId> {
    /// Start, stops in visiting order, end.
    pub sequence: Vec<N>,
    /// Every node traversed, with leg junctions listed once.
    pub full_path: Vec<N>,
    pub total_distance: f64,
}

/// Optimizes the visiting order with default options and no progress
/// reporting.
pub fn optimize_route<N>(graph: &Graph<N>, start: &N, end: &N, stops: &[N]) -> Result<RoutePlan<N>>
where
    N: NodeId + Send + Sync,
{
    optimize_route_with(graph, start, end, stops, &SequencerOptions::default(), &mut NoProgress)
}

/// Optimizes the visiting order of `stops` between `start` and `end`.
///
/// Permutations are tried in lexicographic order of the stops' positions in
/// `stops`; on equal totals the first one found is kept. `progress` is
/// called after every permutation and has no effect on the result.
#[instrument(skip_all, level = Level::DEBUG, fields(start = %start, end = %end, stops = stops.len()))]
pub fn optimize_route_with<N, P>(
    graph: &Graph<N>,
    start: &N,
    end: &N,
    stops: &[N],
    options: &SequencerOptions,
    progress: &mut P,
) -> Result<RoutePlan<N>>
where
    N: NodeId + Send + Sync,
    P: ProgressReporter,
{
    validate_request(start, end, stops, options)?;

    // Index 0 is the start, 1..=k the stops, k + 1 the end.
    let mut points = Vec::with_capacity(stops.len() + 2);
    points.push(start.clone());
    points.extend(stops.iter().cloned());
    points.push(end.clone());

    let legs = LegTable::build(graph, &points, options.parallel_legs);

    let total = factorial(stops.len());
    let mut best: Option<(f64, Vec<usize>)> = None;

    for (index, order) in Permutations::new(stops.len()).enumerate() {
        if let Some(distance) = legs.sequence_distance(&order) {
            let improves = best.as_ref().is_none_or(|(best_distance, _)| distance < *best_distance);
            if improves {
                best = Some((distance, order));
            }
        }
        progress.report(index + 1, total);
    }

    let Some((total_distance, order)) = best else {
        warn!(start = %start, end = %end, "no visiting order connects every leg");
        return Err(RoutingError::NoFeasibleRoute {
            start: start.to_string(),
            end: end.to_string(),
        });
    };

    let visit_order = legs.visit_order(&order);
    let mut full_path = Path::not_found();
    for pair in visit_order.windows(2) {
        full_path.extend_with(legs.get(pair[0], pair[1]));
    }

    debug!(permutations = total, total_distance, "selected visiting order");

    Ok(RoutePlan {
        sequence: visit_order.iter().map(|&i| points[i].clone()).collect(),
        full_path: full_path.into_nodes(),
        total_distance,
    })
}

fn validate_request<N: NodeId>(start: &N, end: &N, stops: &[N], options: &SequencerOptions) -> Result<()> {
    if stops.len() > options.max_stops {
        return Err(RoutingError::InvalidRequest(format!(
            "{} stops requested, at most {} allowed",
            stops.len(),
            options.max_stops
        )));
    }

    let mut seen = HashSet::with_capacity(stops.len());
    for stop in stops {
        if stop == start || stop == end {
            return Err(RoutingError::InvalidRequest(format!(
                "stop {} is also the start or end of the route",
                stop
            )));
        }
        if !seen.insert(stop) {
            return Err(RoutingError::InvalidRequest(format!("stop {} is listed twice", stop)));
        }
    }

    Ok(())
}

/// Shortest paths between every ordered pair of route points that can be
/// consecutive in some visiting order.
struct LegTable<N: NodeId> {
    last: usize,
    legs: HashMap<(usize, usize), Path<N>>,
}

impl<N: NodeId + Send + Sync> LegTable<N> {
    fn build(graph: &Graph<N>, points: &[N], parallel: bool) -> Self {
        let last = points.len() - 1;
        let pairs: Vec<(usize, usize)> = (0..last)
            .flat_map(|from| (1..=last).map(move |to| (from, to)))
            .filter(|&(from, to)| from != to && (last == 1 || (from, to) != (0, last)))
            .collect();

        let solve = |&(from, to): &(usize, usize)| ((from, to), dijkstra(graph, &points[from], &points[to]));
        let legs: HashMap<(usize, usize), Path<N>> = if parallel {
            pairs.par_iter().map(solve).collect()
        } else {
            pairs.iter().map(solve).collect()
        };

        Self { last, legs }
    }
}

impl<N: NodeId> LegTable<N> {
    fn get(&self, from: usize, to: usize) -> &Path<N> {
        &self.legs[&(from, to)]
    }

    /// Point indices for a permutation of stop offsets.
    fn visit_order(&self, order: &[usize]) -> Vec<usize> {
        let mut visit = Vec::with_capacity(order.len() + 2);
        visit.push(0);
        visit.extend(order.iter().map(|stop| stop + 1));
        visit.push(self.last);
        visit
    }

    /// Summed leg distance, or `None` if any leg is unreachable.
    fn sequence_distance(&self, order: &[usize]) -> Option<f64> {
        let visit = self.visit_order(order);
        let mut total = 0.0;
        for pair in visit.windows(2) {
            let leg = self.get(pair[0], pair[1]);
            if leg.is_empty() {
                return None;
            }
            total += leg.distance();
        }
        Some(total)
    }
}

/// Lexicographic permutations of `0..size`. Size 0 yields one empty
/// permutation.
struct Permutations {
    next: Option<Vec<usize>>,
}

impl Permutations {
    fn new(size: usize) -> Self {
        Self {
            next: Some((0..size).collect()),
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;

        let mut following = current.clone();
        if let Some(pivot) = (1..following.len()).rev().find(|&i| following[i - 1] < following[i]) {
            let pivot = pivot - 1;
            let successor = (pivot + 1..following.len())
                .rev()
                .find(|&i| following[i] > following[pivot])
                .unwrap_or(pivot + 1);
            following.swap(pivot, successor);
            following[pivot + 1..].reverse();
            self.next = Some(following);
        }

        Some(current)
    }
}

fn factorial(n: usize) -> usize {
    (1..=n).fold(1usize, |acc, i| acc.saturating_mul(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph<&'static str> {
        let mut graph = Graph::new();
        graph.add_edge("A", "B", 5.0);
        graph.add_edge("B", "C", 5.0);
        graph.add_edge("A", "C", 20.0);
        graph
    }

    #[test]
    fn test_permutations_lexicographic() {
        let all: Vec<_> = Permutations::new(3).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_permutations_empty_and_single() {
        assert_eq!(Permutations::new(0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
        assert_eq!(Permutations::new(1).collect::<Vec<_>>(), vec![vec![0]]);
        assert_eq!(Permutations::new(5).count(), 120);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(8), 40320);
    }

    #[test]
    fn test_single_stop() {
        let plan = optimize_route(&triangle(), &"A", &"C", &["B"]).unwrap();
        assert_eq!(plan.sequence, vec!["A", "B", "C"]);
        assert_eq!(plan.full_path, vec!["A", "B", "C"]);
        assert_eq!(plan.total_distance, 10.0);
    }

    #[test]
    fn test_no_stops_is_direct_route() {
        let plan = optimize_route(&triangle(), &"A", &"C", &[]).unwrap();
        assert_eq!(plan.sequence, vec!["A", "C"]);
        assert_eq!(plan.full_path, vec!["A", "B", "C"]);
        assert_eq!(plan.total_distance, 10.0);
    }

    #[test]
    fn test_rejects_stop_equal_to_endpoint() {
        let result = optimize_route(&triangle(), &"A", &"C", &["A"]);
        assert!(matches!(result, Err(RoutingError::InvalidRequest(_))));
        let result = optimize_route(&triangle(), &"A", &"C", &["C"]);
        assert!(matches!(result, Err(RoutingError::InvalidRequest(_))));
    }

    #[test]
    fn test_rejects_duplicate_stop() {
        let mut graph = triangle();
        graph.add_edge("B", "D", 1.0);
        let result = optimize_route(&graph, &"A", &"C", &["B", "D", "B"]);
        assert!(matches!(result, Err(RoutingError::InvalidRequest(_))));
    }

    #[test]
    fn test_rejects_too_many_stops() {
        let graph = triangle();
        let options = SequencerOptions::default().with_max_stops(0);
        let result = optimize_route_with(&graph, &"A", &"C", &["B"], &options, &mut NoProgress);
        assert!(matches!(result, Err(RoutingError::InvalidRequest(_))));
    }

    #[test]
    fn test_unreachable_stop_is_infeasible() {
        let mut graph = triangle();
        graph.add_node("D");
        let result = optimize_route(&graph, &"A", &"C", &["D"]);
        assert_eq!(
            result,
            Err(RoutingError::NoFeasibleRoute {
                start: "A".to_string(),
                end: "C".to_string()
            })
        );
    }

    #[test]
    fn test_progress_reports_every_permutation() {
        let mut graph = triangle();
        graph.add_edge("C", "D", 3.0);
        graph.add_edge("A", "E", 4.0);
        graph.add_edge("E", "D", 4.0);

        let mut reports = Vec::new();
        let mut reporter = |done: usize, total: usize| reports.push((done, total));
        optimize_route_with(&graph, &"A", &"D", &["B", "C", "E"], &SequencerOptions::default(), &mut reporter)
            .unwrap();

        assert_eq!(reports.len(), 6);
        assert_eq!(reports.last(), Some(&(6, 6)));
    }
}
