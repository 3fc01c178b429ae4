//! Shortest-path primitives shared by every path engine.
//!
//! [`ShortestPathTree`] runs a label-setting Dijkstra either forward from a
//! source or backward into a target. The backward tree doubles as the exact,
//! admissible lower bound (`h`) used by the best-first engines, and its tree
//! path from the source is the first result of every run.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::graph::{Graph, NodeId};
use crate::path::Path;

/// Which adjacency the tree is grown along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeDirection {
    /// Distances *from* the root along outgoing edges.
    Forward,
    /// Distances *to* the root along incoming edges.
    Reverse,
}

/// Single-root shortest-path tree with distances and parent links.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    root: NodeId,
    direction: TreeDirection,
    distances: Vec<f64>,
    parents: Vec<Option<NodeId>>,
}

impl ShortestPathTree {
    /// Distances from `source` to every node.
    pub fn from_source(graph: &Graph, source: NodeId) -> Self {
        Self::build(graph, source, TreeDirection::Forward)
    }

    /// Distances from every node to `target`.
    pub fn to_target(graph: &Graph, target: NodeId) -> Self {
        Self::build(graph, target, TreeDirection::Reverse)
    }

    fn build(graph: &Graph, root: NodeId, direction: TreeDirection) -> Self {
        let node_count = graph.node_count();
        let mut distances = vec![f64::INFINITY; node_count];
        let mut parents = vec![None; node_count];
        let mut settled = vec![false; node_count];
        let mut queue = BinaryHeap::new();

        if graph.contains(root) {
            distances[root] = 0.0;
            queue.push(QueueEntry::new(root, 0.0));
        }

        while let Some(entry) = queue.pop() {
            if settled[entry.node] {
                continue;
            }
            settled[entry.node] = true;

            let edges = match direction {
                TreeDirection::Forward => graph.neighbours(entry.node),
                TreeDirection::Reverse => graph.predecessors(entry.node),
            };
            for edge in edges {
                let next_cost = entry.cost.0 + edge.weight;
                if next_cost < distances[edge.node] {
                    distances[edge.node] = next_cost;
                    parents[edge.node] = Some(entry.node);
                    queue.push(QueueEntry::new(edge.node, next_cost));
                }
            }
        }

        Self {
            root,
            direction,
            distances,
            parents,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn direction(&self) -> TreeDirection {
        self.direction
    }

    /// Shortest distance between `node` and the root; `+inf` when unreachable.
    pub fn distance(&self, node: NodeId) -> f64 {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node).is_finite()
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn into_distances(self) -> Vec<f64> {
        self.distances
    }

    /// Tree path between `node` and the root, oriented along edge direction
    /// (root first for forward trees, root last for reverse trees).
    pub fn path(&self, node: NodeId) -> Option<Path> {
        if !self.is_reachable(node) {
            return None;
        }

        let mut nodes = vec![node];
        let mut current = node;
        while let Some(parent) = self.parents[current] {
            nodes.push(parent);
            current = parent;
        }
        if self.direction == TreeDirection::Forward {
            nodes.reverse();
        }
        Some(Path::new(nodes, self.distances[node]))
    }
}

/// Shortest `source → target` path plus the distance-to-target table for
/// every node.
///
/// Returns `None` when the target cannot be reached from the source.
pub fn shortest_path_and_bounds(
    graph: &Graph,
    source: NodeId,
    target: NodeId,
) -> Option<(Path, Vec<f64>)> {
    let tree = ShortestPathTree::to_target(graph, target);
    let path = tree.path(source)?;
    Some((path, tree.into_distances()))
}

/// A* search from `source` to `target` that ignores the directed edges in
/// `removed`.
///
/// `bounds` must never overestimate the remaining distance; the reverse
/// distances of the unrestricted graph qualify because removing edges only
/// lengthens shortest paths.
pub fn a_star_limited(
    graph: &Graph,
    source: NodeId,
    target: NodeId,
    bounds: &[f64],
    removed: &HashSet<(NodeId, NodeId)>,
) -> Option<Path> {
    if !graph.contains(source) || !graph.contains(target) {
        return None;
    }

    let node_count = graph.node_count();
    let mut g_score = vec![f64::INFINITY; node_count];
    let mut parents: Vec<Option<NodeId>> = vec![None; node_count];
    let mut queue = BinaryHeap::new();

    let heuristic = |node: NodeId| bounds.get(node).copied().unwrap_or(0.0);

    g_score[source] = 0.0;
    queue.push(AStarEntry::new(source, 0.0, heuristic(source)));

    while let Some(entry) = queue.pop() {
        if entry.cost.0 > g_score[entry.node] {
            continue;
        }

        if entry.node == target {
            let nodes = reconstruct_path(&parents, source, target);
            return Some(Path::new(nodes, g_score[target]));
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.node;
            if removed.contains(&(entry.node, next)) {
                continue;
            }
            let estimate = heuristic(next);
            if !estimate.is_finite() {
                continue;
            }

            let tentative_g = entry.cost.0 + edge.weight;
            if tentative_g < g_score[next] {
                g_score[next] = tentative_g;
                parents[next] = Some(entry.node);
                queue.push(AStarEntry::new(next, tentative_g, estimate));
            }
        }
    }

    None
}

fn reconstruct_path(parents: &[Option<NodeId>], start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents[node];
    }
    path.reverse();
    path
}

/// Total-order wrapper so `f64` costs can key a `BinaryHeap`.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatOrd(pub(crate) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: NodeId,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl AStarEntry {
    fn new(node: NodeId, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
