use std::collections::TryReserveError;
use std::sync::Arc;

use tracing::warn;

use crate::error::{Error, Result};

/// Dense, zero-based node identifier. Doubles as an index into adjacency tables.
pub type NodeId = usize;

/// One end of a directed, weighted edge as stored in an adjacency list.
///
/// In [`Graph::neighbours`] `node` is the head of the edge; in
/// [`Graph::predecessors`] it is the tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    pub node: NodeId,
    pub weight: f64,
}

/// Order-independent edge key used for overlap bookkeeping.
///
/// `EdgeKey::new(a, b) == EdgeKey::new(b, a)`. Traversal and weight lookup
/// always use the directed `(from, to)` pair instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    low: NodeId,
    high: NodeId,
}

impl EdgeKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Endpoints in ascending order.
    pub fn endpoints(self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }
}

/// Immutable directed graph with non-negative edge weights.
///
/// Adjacency tables sit behind `Arc`, so clones are cheap and can be handed to
/// independent searches running on other threads.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    outgoing: Arc<Vec<Vec<Neighbour>>>,
    incoming: Arc<Vec<Vec<Neighbour>>>,
    edge_count: usize,
}

impl Graph {
    /// Build a graph from `(from, to, weight)` triples.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId, f64)>,
    {
        let mut builder = GraphBuilder::new(node_count);
        for (from, to, weight) in edges {
            builder.add_edge(from, to, weight)?;
        }
        Ok(builder.build())
    }

    pub fn node_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether `node` is a valid identifier for this graph.
    pub fn contains(&self, node: NodeId) -> bool {
        node < self.node_count()
    }

    /// Outgoing edges of `node`.
    pub fn neighbours(&self, node: NodeId) -> &[Neighbour] {
        self.outgoing
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Incoming edges of `node`; each entry names the edge's tail.
    pub fn predecessors(&self, node: NodeId) -> &[Neighbour] {
        self.incoming
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Weight of the directed edge `from -> to`, if present.
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.neighbours(from)
            .iter()
            .find(|edge| edge.node == to)
            .map(|edge| edge.weight)
    }

    /// Number of nodes with neither incoming nor outgoing edges.
    pub fn isolated_nodes(&self) -> usize {
        (0..self.node_count())
            .filter(|&node| self.neighbours(node).is_empty() && self.predecessors(node).is_empty())
            .count()
    }
}

/// Incrementally collects edges before freezing them into a [`Graph`].
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    outgoing: Vec<Vec<Neighbour>>,
    incoming: Vec<Vec<Neighbour>>,
    edge_count: usize,
}

impl GraphBuilder {
    pub fn new(node_count: usize) -> Self {
        Self {
            outgoing: vec![Vec::new(); node_count],
            incoming: vec![Vec::new(); node_count],
            edge_count: 0,
        }
    }

    /// Like [`GraphBuilder::new`], but reports a failed allocation instead of
    /// aborting. Used for node counts read from untrusted input.
    pub fn try_new(node_count: usize) -> std::result::Result<Self, TryReserveError> {
        let mut outgoing = Vec::new();
        outgoing.try_reserve_exact(node_count)?;
        let mut incoming = Vec::new();
        incoming.try_reserve_exact(node_count)?;
        outgoing.resize_with(node_count, Vec::new);
        incoming.resize_with(node_count, Vec::new);
        Ok(Self {
            outgoing,
            incoming,
            edge_count: 0,
        })
    }

    /// Add the directed edge `from -> to`.
    ///
    /// A repeated `(from, to)` pair keeps the weight seen first.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<()> {
        let node_count = self.outgoing.len();
        for node in [from, to] {
            if node >= node_count {
                return Err(Error::NodeOutOfRange { node, node_count });
            }
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight { from, to, weight });
        }

        if self.outgoing[from].iter().any(|edge| edge.node == to) {
            warn!("ignoring duplicate edge {} -> {} (weight {})", from, to, weight);
            return Ok(());
        }

        self.outgoing[from].push(Neighbour { node: to, weight });
        self.incoming[to].push(Neighbour { node: from, weight });
        self.edge_count += 1;
        Ok(())
    }

    pub fn build(self) -> Graph {
        Graph {
            outgoing: Arc::new(self.outgoing),
            incoming: Arc::new(self.incoming),
            edge_count: self.edge_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_key_ignores_direction() {
        assert_eq!(EdgeKey::new(3, 1), EdgeKey::new(1, 3));
        assert_eq!(EdgeKey::new(3, 1).endpoints(), (1, 3));
        assert_ne!(EdgeKey::new(1, 2), EdgeKey::new(1, 3));
    }

    #[test]
    fn builder_keeps_first_duplicate_weight() {
        let mut builder = GraphBuilder::new(2);
        builder.add_edge(0, 1, 4.0).unwrap();
        builder.add_edge(0, 1, 9.0).unwrap();
        let graph = builder.build();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight(0, 1), Some(4.0));
        assert_eq!(graph.edge_weight(1, 0), None);
    }

    #[test]
    fn builder_rejects_bad_edges() {
        let mut builder = GraphBuilder::new(2);
        assert!(matches!(
            builder.add_edge(0, 2, 1.0),
            Err(Error::NodeOutOfRange { node: 2, node_count: 2 })
        ));
        assert!(matches!(
            builder.add_edge(0, 1, -1.0),
            Err(Error::InvalidWeight { .. })
        ));
        assert!(matches!(
            builder.add_edge(0, 1, f64::NAN),
            Err(Error::InvalidWeight { .. })
        ));
    }

    #[test]
    fn fallible_builder_reports_oversized_graphs() {
        assert!(GraphBuilder::try_new(usize::MAX).is_err());

        let mut builder = GraphBuilder::try_new(3).unwrap();
        builder.add_edge(2, 0, 1.0).unwrap();
        let graph = builder.build();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_weight(2, 0), Some(1.0));
    }

    #[test]
    fn unknown_nodes_have_no_neighbours() {
        let graph = Graph::from_edges(2, [(0, 1, 1.0)]).unwrap();
        assert!(graph.neighbours(7).is_empty());
        assert!(graph.predecessors(7).is_empty());
        assert_eq!(graph.predecessors(1)[0].node, 0);
        assert!(!graph.contains(2));
    }
}
