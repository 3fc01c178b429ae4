use std::collections::HashMap;

use crate::graph::{EdgeKey, Graph, NodeId};
use crate::path::Path;

/// Ordered list of accepted paths plus an index from undirected edge to the
/// accepted paths that use it.
#[derive(Debug, Clone, Default)]
pub(crate) struct AcceptedPaths {
    paths: Vec<Path>,
    edge_index: HashMap<EdgeKey, Vec<usize>>,
}

impl AcceptedPaths {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append `path` and register its edges. Returns the new path's index.
    pub(crate) fn accept(&mut self, path: Path) -> usize {
        let index = self.paths.len();
        for key in path.edge_keys() {
            self.edge_index.entry(key).or_default().push(index);
        }
        self.paths.push(path);
        index
    }

    pub(crate) fn len(&self) -> usize {
        self.paths.len()
    }

    pub(crate) fn get(&self, index: usize) -> &Path {
        &self.paths[index]
    }

    pub(crate) fn into_paths(self) -> Vec<Path> {
        self.paths
    }

    /// Indices of accepted paths using the edge `from - to` in either direction.
    pub(crate) fn containing(&self, from: NodeId, to: NodeId) -> &[usize] {
        self.edge_index
            .get(&EdgeKey::new(from, to))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether an already accepted path visits exactly `nodes`.
    pub(crate) fn contains_route(&self, nodes: &[NodeId]) -> bool {
        self.paths.iter().any(|path| path.nodes() == nodes)
    }

    /// Whether `shared` units of overlap with path `index` exceed `theta`.
    pub(crate) fn exceeds(&self, index: usize, shared: f64, theta: f64) -> bool {
        let length = self.paths[index].length();
        length > 0.0 && shared / length > theta
    }

    /// Fold the edge `from -> to` into an overlap accumulator.
    ///
    /// The accumulator is first grown to one slot per accepted path. Only
    /// accepted paths with index `>= first` are considered. Returns `false` as
    /// soon as one accumulator exceeds `theta`.
    pub(crate) fn add_edge_overlap(
        &self,
        from: NodeId,
        to: NodeId,
        weight: f64,
        first: usize,
        overlaps: &mut Vec<f64>,
        theta: f64,
    ) -> bool {
        if overlaps.len() < self.paths.len() {
            overlaps.resize(self.paths.len(), 0.0);
        }
        for &index in self.containing(from, to) {
            if index < first {
                continue;
            }
            overlaps[index] += weight;
            if self.exceeds(index, overlaps[index], theta) {
                return false;
            }
        }
        true
    }

    /// Whether `candidate` overlaps every accepted path by at most `theta`.
    pub(crate) fn admits(&self, candidate: &Path, graph: &Graph, theta: f64) -> bool {
        self.most_overlapped(candidate, graph, theta).is_none()
    }

    /// The accepted path whose overlap ratio with `candidate` is largest,
    /// provided that ratio exceeds `theta`. Ties keep the earliest path.
    pub(crate) fn most_overlapped(
        &self,
        candidate: &Path,
        graph: &Graph,
        theta: f64,
    ) -> Option<usize> {
        let mut worst: Option<(usize, f64)> = None;
        for (index, path) in self.paths.iter().enumerate() {
            let ratio = path.overlap_ratio(candidate, graph);
            if ratio <= theta {
                continue;
            }
            let worse = match worst {
                Some((_, current)) => ratio > current,
                None => true,
            };
            if worse {
                worst = Some((index, ratio));
            }
        }
        worst.map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::braided_graph;

    #[test]
    fn edges_are_indexed_in_both_directions() {
        let graph = braided_graph();
        let mut registry = AcceptedPaths::new();
        registry.accept(Path::from_nodes(&graph, vec![0, 1, 3]).unwrap());
        registry.accept(Path::from_nodes(&graph, vec![0, 1, 2, 3]).unwrap());

        assert_eq!(registry.containing(0, 1), &[0, 1]);
        assert_eq!(registry.containing(1, 0), &[0, 1]);
        assert_eq!(registry.containing(3, 1), &[0]);
        assert!(registry.containing(0, 2).is_empty());
    }

    #[test]
    fn add_edge_overlap_respects_first_index() {
        let graph = braided_graph();
        let mut registry = AcceptedPaths::new();
        registry.accept(Path::from_nodes(&graph, vec![0, 1, 3]).unwrap());
        registry.accept(Path::from_nodes(&graph, vec![0, 1, 2, 3]).unwrap());

        let mut overlaps = Vec::new();
        assert!(registry.add_edge_overlap(0, 1, 1.0, 1, &mut overlaps, 1.0));
        assert_eq!(overlaps, vec![0.0, 1.0]);
    }

    #[test]
    fn add_edge_overlap_stops_past_theta() {
        let graph = braided_graph();
        let mut registry = AcceptedPaths::new();
        registry.accept(Path::from_nodes(&graph, vec![0, 1, 3]).unwrap());

        let mut overlaps = vec![0.0];
        assert!(registry.add_edge_overlap(0, 1, 1.0, 0, &mut overlaps, 0.5));
        assert!(!registry.add_edge_overlap(1, 3, 1.0, 0, &mut overlaps, 0.5));
    }

    #[test]
    fn most_overlapped_picks_largest_ratio() {
        let graph = braided_graph();
        let mut registry = AcceptedPaths::new();
        registry.accept(Path::from_nodes(&graph, vec![0, 2, 3]).unwrap());
        registry.accept(Path::from_nodes(&graph, vec![0, 1, 3]).unwrap());

        let candidate = Path::from_nodes(&graph, vec![0, 1, 2, 3]).unwrap();
        assert_eq!(registry.most_overlapped(&candidate, &graph, 0.0), Some(0));
        assert!(registry.admits(&candidate, &graph, 0.5));
        assert!(!registry.admits(&candidate, &graph, 0.4));
    }
}
