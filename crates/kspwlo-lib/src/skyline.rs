//! Per-node Pareto store of overlap vectors used to prune search labels.
//!
//! A candidate label is dominated when some label already expanded at the same
//! node has an overlap vector that is component-wise no larger. Vectors may
//! differ in length; missing trailing components count as zero. Entries are
//! never removed or refreshed during a run, so a stored vector keeps zeros for
//! paths accepted after it was recorded.

use crate::graph::NodeId;

/// How a stored entry is compared against a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominanceRule {
    /// Compare overlap vectors only.
    Overlap,
    /// Additionally require the stored label to be no longer than the candidate.
    LengthAndOverlap,
}

#[derive(Debug, Clone)]
struct SkylineEntry {
    length: f64,
    overlaps: Box<[f64]>,
}

impl SkylineEntry {
    fn dominates(&self, rule: DominanceRule, length: f64, overlaps: &[f64]) -> bool {
        if rule == DominanceRule::LengthAndOverlap && self.length > length {
            return false;
        }
        let width = self.overlaps.len().max(overlaps.len());
        (0..width).all(|index| {
            let stored = self.overlaps.get(index).copied().unwrap_or(0.0);
            let candidate = overlaps.get(index).copied().unwrap_or(0.0);
            stored <= candidate
        })
    }
}

/// Skyline container indexed by node.
#[derive(Debug, Clone)]
pub struct Skyline {
    rule: DominanceRule,
    nodes: Vec<Vec<SkylineEntry>>,
    size: usize,
}

impl Skyline {
    pub fn new(node_count: usize, rule: DominanceRule) -> Self {
        Self {
            rule,
            nodes: vec![Vec::new(); node_count],
            size: 0,
        }
    }

    pub fn rule(&self) -> DominanceRule {
        self.rule
    }

    /// Record an expanded label at `node`.
    pub fn insert(&mut self, node: NodeId, length: f64, overlaps: &[f64]) {
        if node >= self.nodes.len() {
            self.nodes.resize_with(node + 1, Vec::new);
        }
        self.nodes[node].push(SkylineEntry {
            length,
            overlaps: overlaps.into(),
        });
        self.size += 1;
    }

    /// Whether a label at `node` with the given length and overlap vector is
    /// dominated by an entry already stored there.
    pub fn dominates(&self, node: NodeId, length: f64, overlaps: &[f64]) -> bool {
        self.nodes.get(node).is_some_and(|entries| {
            entries
                .iter()
                .any(|entry| entry.dominates(self.rule, length, overlaps))
        })
    }

    /// Total number of stored entries across all nodes.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of entries stored at `node`.
    pub fn entries_at(&self, node: NodeId) -> usize {
        self.nodes.get(node).map_or(0, Vec::len)
    }
}
