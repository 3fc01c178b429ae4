//! SVP+: single-via-path alternatives.
//!
//! Every node `v` defines the via-path "shortest `source → v`, then shortest
//! `v → target`". Via-paths are examined in ascending length and accepted
//! when they are simple and overlap every accepted path by at most `theta`.
//! A node already covered by an examined via-path is skipped, since its own
//! via-path would mostly repeat that one.

use tracing::debug;

use crate::graph::{Graph, NodeId};
use crate::path::Path;
use crate::search::{FloatOrd, ShortestPathTree};

use super::registry::AcceptedPaths;
use super::{KspQuery, SearchOptions, SearchOutcome, SearchStats, Termination};

pub fn svp_plus(graph: &Graph, query: &KspQuery, options: &SearchOptions) -> SearchOutcome {
    let forward = ShortestPathTree::from_source(graph, query.source);
    let reverse = ShortestPathTree::to_target(graph, query.target);
    let Some(witness) = reverse.path(query.source) else {
        debug!("target {} is unreachable from {}", query.target, query.source);
        return SearchOutcome::unreachable();
    };

    let mut covered = vec![false; graph.node_count()];
    for &node in witness.nodes() {
        covered[node] = true;
    }
    let mut registry = AcceptedPaths::new();
    registry.accept(witness);
    let mut stats = SearchStats::default();

    let mut candidates: Vec<(FloatOrd, NodeId)> = (0..graph.node_count())
        .filter(|&node| !covered[node])
        .filter_map(|node| {
            let via_length = forward.distance(node) + reverse.distance(node);
            via_length.is_finite().then_some((FloatOrd(via_length), node))
        })
        .collect();
    candidates.sort_unstable();

    let mut termination = Termination::Exhausted;
    for (_, via) in candidates {
        if registry.len() == query.k {
            termination = Termination::Completed;
            break;
        }
        if options.is_cancelled() {
            termination = Termination::Cancelled;
            break;
        }
        if covered[via] {
            stats.pruned_by_dominance += 1;
            continue;
        }

        let Some(candidate) = via_path(&forward, &reverse, via) else {
            continue;
        };
        stats.labels_created += 1;
        if !candidate.is_simple() {
            stats.pruned_by_dominance += 1;
            continue;
        }
        for &node in candidate.nodes() {
            covered[node] = true;
        }

        if registry.contains_route(candidate.nodes())
            || !registry.admits(&candidate, graph, query.theta)
        {
            stats.pruned_by_overlap += 1;
            continue;
        }
        let index = registry.accept(candidate);
        debug!("accepted via-path #{} through node {}", index, via);
    }
    if registry.len() == query.k {
        termination = Termination::Completed;
    }

    SearchOutcome::new(registry.into_paths(), termination, stats)
}

/// Concatenate the forward tree path to `via` with the reverse tree path from it.
fn via_path(forward: &ShortestPathTree, reverse: &ShortestPathTree, via: NodeId) -> Option<Path> {
    let head = forward.path(via)?;
    let tail = reverse.path(via)?;
    let length = head.length() + tail.length();
    let mut nodes = head.nodes().to_vec();
    nodes.extend_from_slice(&tail.nodes()[1..]);
    Some(Path::new(nodes, length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{bridge_graph, square_graph};

    #[test]
    fn via_node_off_the_witness_gives_second_route() {
        let outcome = svp_plus(
            &square_graph(),
            &KspQuery::new(0, 3, 2, 0.5),
            &SearchOptions::default(),
        );
        let routes: Vec<_> = outcome.paths.iter().map(|p| p.nodes().to_vec()).collect();
        assert_eq!(routes, vec![vec![0, 1, 3], vec![0, 2, 3]]);
        assert_eq!(outcome.termination, Termination::Completed);
    }

    #[test]
    fn overlapping_via_paths_are_rejected() {
        let outcome = svp_plus(
            &bridge_graph(),
            &KspQuery::new(0, 5, 3, 0.0),
            &SearchOptions::default(),
        );
        assert_eq!(outcome.paths.len(), 1);
        assert_eq!(outcome.termination, Termination::Exhausted);
        assert_eq!(outcome.stats.pruned_by_overlap, 1);
    }

    #[test]
    fn via_path_joins_at_the_via_node() {
        let graph = square_graph();
        let forward = ShortestPathTree::from_source(&graph, 0);
        let reverse = ShortestPathTree::to_target(&graph, 3);
        let path = via_path(&forward, &reverse, 2).unwrap();
        assert_eq!(path.nodes(), &[0, 2, 3]);
        assert_eq!(path.length(), 2.0);
    }
}
