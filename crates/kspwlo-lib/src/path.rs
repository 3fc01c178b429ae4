use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{EdgeKey, Graph, NodeId};

/// Relative tolerance used when comparing a cached path length with the
/// summed weights of its edges.
const LENGTH_TOLERANCE: f64 = 1e-9;

/// A discovered source→target path: node sequence plus cached total length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    length: f64,
    nodes: Vec<NodeId>,
}

impl Path {
    pub fn new(nodes: Vec<NodeId>, length: f64) -> Self {
        Self { length, nodes }
    }

    /// Build a path by summing the weights of its directed edges.
    ///
    /// Returns `None` when two consecutive nodes are not joined by an edge.
    pub fn from_nodes(graph: &Graph, nodes: Vec<NodeId>) -> Option<Self> {
        let length = nodes
            .windows(2)
            .map(|pair| graph.edge_weight(pair[0], pair[1]))
            .sum::<Option<f64>>()?;
        Some(Self { length, nodes })
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn target(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Directed `(from, to)` pairs in travel order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Direction-independent keys of every edge on the path.
    pub fn edge_keys(&self) -> HashSet<EdgeKey> {
        self.edges().map(|(from, to)| EdgeKey::new(from, to)).collect()
    }

    /// `true` when no node occurs twice.
    pub fn is_simple(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        self.nodes.iter().all(|node| seen.insert(*node))
    }

    /// Total weight of `candidate`'s edges that also appear (in either
    /// direction) on this path.
    pub fn shared_length(&self, candidate: &Path, graph: &Graph) -> f64 {
        let keys = self.edge_keys();
        candidate
            .edges()
            .filter(|&(from, to)| keys.contains(&EdgeKey::new(from, to)))
            .map(|(from, to)| graph.edge_weight(from, to).unwrap_or(0.0))
            .sum()
    }

    /// Overlap of `candidate` with this (earlier, reference) path, as a
    /// fraction of this path's length.
    pub fn overlap_ratio(&self, candidate: &Path, graph: &Graph) -> f64 {
        if self.length <= 0.0 {
            return 0.0;
        }
        self.shared_length(candidate, graph) / self.length
    }

    /// Check the path against `graph`: non-empty, every hop is an edge, and
    /// the cached length matches the summed weights.
    ///
    /// `index` is the path's position in the result set and only feeds the
    /// error message.
    pub fn verify(&self, graph: &Graph, index: usize) -> Result<()> {
        let corrupt = |reason: String| Error::CorruptPath { index, reason };

        if self.nodes.is_empty() {
            return Err(corrupt("path has no nodes".to_string()));
        }
        if !self.length.is_finite() {
            return Err(corrupt(format!("length {} is not finite", self.length)));
        }

        let mut expected = 0.0;
        for (from, to) in self.edges() {
            let weight = graph
                .edge_weight(from, to)
                .ok_or_else(|| corrupt(format!("edge {from} -> {to} is not in the graph")))?;
            expected += weight;
        }

        if (expected - self.length).abs() > LENGTH_TOLERANCE * expected.max(1.0) {
            return Err(corrupt(format!(
                "cached length {} disagrees with edge weight sum {}",
                self.length, expected
            )));
        }
        Ok(())
    }

    /// Legacy row layout: `[length, n0, n1, ..., nn]`.
    pub fn to_row(&self) -> Vec<f64> {
        std::iter::once(self.length)
            .chain(self.nodes.iter().map(|&node| node as f64))
            .collect()
    }
}
