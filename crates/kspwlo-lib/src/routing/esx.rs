//! ESX: edge-exclusion alternatives.
//!
//! Each round runs A* over the graph minus the edges removed so far. A
//! candidate that overlaps every accepted path by at most `theta` is accepted;
//! otherwise the heaviest edge it shares with the accepted path it overlaps
//! most is removed and the search repeats. Every round removes a fresh edge,
//! so the loop ends after at most `edge_count` rejections.

use std::collections::HashSet;

use tracing::debug;

use crate::graph::{EdgeKey, Graph, NodeId};
use crate::path::Path;
use crate::search::{a_star_limited, shortest_path_and_bounds};

use super::registry::AcceptedPaths;
use super::{KspQuery, SearchOptions, SearchOutcome, SearchStats, Termination};

pub fn esx(graph: &Graph, query: &KspQuery, options: &SearchOptions) -> SearchOutcome {
    let Some((witness, bounds)) = shortest_path_and_bounds(graph, query.source, query.target)
    else {
        debug!("target {} is unreachable from {}", query.target, query.source);
        return SearchOutcome::unreachable();
    };

    let mut registry = AcceptedPaths::new();
    registry.accept(witness);
    let mut stats = SearchStats::default();
    let mut removed: HashSet<(NodeId, NodeId)> = HashSet::new();

    let termination = loop {
        if registry.len() == query.k {
            break Termination::Completed;
        }
        if options.is_cancelled() {
            break Termination::Cancelled;
        }
        let Some(candidate) = a_star_limited(graph, query.source, query.target, &bounds, &removed)
        else {
            break Termination::Exhausted;
        };
        stats.labels_created += 1;

        let blocking = registry
            .most_overlapped(&candidate, graph, query.theta)
            .or_else(|| {
                (0..registry.len()).find(|&index| registry.get(index).nodes() == candidate.nodes())
            });
        let Some(blocking) = blocking else {
            let index = registry.accept(candidate);
            debug!("accepted path #{} with {} edges excluded", index, removed.len());
            continue;
        };

        stats.pruned_by_overlap += 1;
        match heaviest_shared_edge(graph, &candidate, registry.get(blocking)) {
            Some(edge) => {
                removed.insert(edge);
            }
            None => break Termination::Exhausted,
        }
    };

    debug!("esx removed {} edges: {:?}", removed.len(), stats);
    SearchOutcome::new(registry.into_paths(), termination, stats)
}

/// Directed edge of `candidate` with the largest weight among those also on
/// `reference`. Ties keep the edge met first along the candidate.
fn heaviest_shared_edge(
    graph: &Graph,
    candidate: &Path,
    reference: &Path,
) -> Option<(NodeId, NodeId)> {
    let shared = reference.edge_keys();
    let mut heaviest: Option<((NodeId, NodeId), f64)> = None;
    for (from, to) in candidate.edges() {
        if !shared.contains(&EdgeKey::new(from, to)) {
            continue;
        }
        let weight = graph.edge_weight(from, to).unwrap_or(0.0);
        let heavier = match heaviest {
            Some((_, best)) => weight > best,
            None => true,
        };
        if heavier {
            heaviest = Some(((from, to), weight));
        }
    }
    heaviest.map(|(edge, _)| edge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{braided_graph, bridge_graph, square_graph};

    #[test]
    fn excluding_the_witness_edge_reveals_the_detour() {
        let outcome = esx(
            &square_graph(),
            &KspQuery::new(0, 3, 2, 0.5),
            &SearchOptions::default(),
        );
        let routes: Vec<_> = outcome.paths.iter().map(|p| p.nodes().to_vec()).collect();
        assert_eq!(routes, vec![vec![0, 1, 3], vec![0, 2, 3]]);
        assert_eq!(outcome.termination, Termination::Completed);
    }

    #[test]
    fn stops_once_no_path_survives_exclusion() {
        let outcome = esx(
            &bridge_graph(),
            &KspQuery::new(0, 5, 3, 0.0),
            &SearchOptions::default(),
        );
        assert_eq!(outcome.paths.len(), 1);
        assert_eq!(outcome.termination, Termination::Exhausted);
    }

    #[test]
    fn heaviest_shared_edge_prefers_first_on_ties() {
        let graph = braided_graph();
        let reference = Path::from_nodes(&graph, vec![0, 1, 3]).unwrap();
        let candidate = Path::from_nodes(&graph, vec![0, 1, 2, 3]).unwrap();
        assert_eq!(heaviest_shared_edge(&graph, &candidate, &reference), Some((0, 1)));

        let disjoint = Path::from_nodes(&graph, vec![0, 2, 3]).unwrap();
        assert_eq!(heaviest_shared_edge(&graph, &disjoint, &reference), None);
    }
}
