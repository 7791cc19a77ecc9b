//! Single-source, single-target shortest path (Dijkstra).
//!
//! Label setting over a binary min-heap with lazy decrease-key: improved
//! labels are pushed again and stale entries are skipped once their node is
//! settled. The search stops as soon as the target is settled, which is
//! valid because edge weights are non-negative.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::trace;

use crate::graph::Graph;
use crate::path::Path;
use crate::traits::NodeId;

#[derive(Debug, Clone)]
struct HeapItem<N> {
    distance: f64,
    node: N,
}

impl<N: Ord> PartialEq for HeapItem<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N: Ord> Eq for HeapItem<N> {}

impl<N: Ord> PartialOrd for HeapItem<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: Ord> Ord for HeapItem<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flipped to make BinaryHeap a min-heap; equal distances pop the
        // smaller node id first.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

struct NodeData<N> {
    distance: f64,
    parent: Option<N>,
    settled: bool,
}

/// Shortest path from `start` to `end`.
///
/// Returns [`Path::not_found`] when either endpoint is missing from `graph`
/// or `end` is unreachable. `start == end` yields a single-node path of
/// distance 0.
pub fn dijkstra<N: NodeId>(graph: &Graph<N>, start: &N, end: &N) -> Path<N> {
    if !graph.contains(start) || !graph.contains(end) {
        return Path::not_found();
    }

    let mut heap = BinaryHeap::new();
    let mut data: HashMap<N, NodeData<N>> = HashMap::new();

    data.insert(
        start.clone(),
        NodeData {
            distance: 0.0,
            parent: None,
            settled: false,
        },
    );
    heap.push(HeapItem {
        distance: 0.0,
        node: start.clone(),
    });

    let mut settled_count = 0usize;

    while let Some(HeapItem { distance, node }) = heap.pop() {
        if &node == end {
            break;
        }

        match data.get_mut(&node) {
            Some(entry) if !entry.settled => entry.settled = true,
            _ => continue,
        }
        settled_count += 1;

        for (neighbor, weight) in graph.neighbors(&node) {
            let next_distance = distance + weight;
            let entry = data.entry(neighbor.clone()).or_insert_with(|| NodeData {
                distance: f64::INFINITY,
                parent: None,
                settled: false,
            });
            if entry.settled {
                continue;
            }

            if next_distance < entry.distance {
                entry.distance = next_distance;
                entry.parent = Some(node.clone());
                heap.push(HeapItem {
                    distance: next_distance,
                    node: neighbor.clone(),
                });
            }
        }
    }

    trace!(settled = settled_count, start = %start, end = %end, "dijkstra finished");

    let Some(target) = data.get(end) else {
        return Path::not_found();
    };
    let total = target.distance;

    let mut nodes = vec![end.clone()];
    let mut current = end;
    while current != start {
        match data.get(current).and_then(|entry| entry.parent.as_ref()) {
            Some(parent) => {
                nodes.push(parent.clone());
                current = parent;
            }
            None => return Path::not_found(),
        }
    }
    nodes.reverse();

    Path::new(nodes, total)
}
