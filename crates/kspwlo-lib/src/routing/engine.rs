//! Single-pass, overlap-aware best-first search (OnePass+ and OnePass).
//!
//! One A*-ordered search keeps running after each accepted path. Labels queued
//! before a path was accepted are revalidated against the new paths lazily,
//! when they are popped, instead of rescanning the whole frontier.

use tracing::debug;

use crate::graph::{Graph, NodeId};
use crate::path::Path;
use crate::search::shortest_path_and_bounds;
use crate::skyline::{DominanceRule, Skyline};

use super::label::{Frontier, Label, LabelArena, LabelId};
use super::registry::AcceptedPaths;
use super::{KspQuery, SearchOptions, SearchOutcome, SearchStats, Termination};

/// OnePass+: skyline dominance on overlap vectors alone.
pub fn onepass_plus(graph: &Graph, query: &KspQuery, options: &SearchOptions) -> SearchOutcome {
    OverlapSearch::new(graph, query, options, DominanceRule::Overlap).run()
}

/// OnePass: a stored label must also be no longer than the candidate it prunes.
pub fn onepass(graph: &Graph, query: &KspQuery, options: &SearchOptions) -> SearchOutcome {
    OverlapSearch::new(graph, query, options, DominanceRule::LengthAndOverlap).run()
}

struct OverlapSearch<'a> {
    graph: &'a Graph,
    query: &'a KspQuery,
    options: &'a SearchOptions,
    rule: DominanceRule,
}

impl<'a> OverlapSearch<'a> {
    fn new(
        graph: &'a Graph,
        query: &'a KspQuery,
        options: &'a SearchOptions,
        rule: DominanceRule,
    ) -> Self {
        Self {
            graph,
            query,
            options,
            rule,
        }
    }

    fn run(self) -> SearchOutcome {
        let KspQuery {
            source,
            target,
            k,
            theta,
        } = *self.query;

        let Some((witness, bounds)) = shortest_path_and_bounds(self.graph, source, target) else {
            debug!("target {} is unreachable from {}", target, source);
            return SearchOutcome::unreachable();
        };

        let mut registry = AcceptedPaths::new();
        registry.accept(witness);
        let mut stats = SearchStats::default();
        if k == 1 {
            return SearchOutcome::new(registry.into_paths(), Termination::Completed, stats);
        }

        let mut arena = LabelArena::default();
        let mut frontier = Frontier::default();
        let mut skyline = Skyline::new(self.graph.node_count(), self.rule);

        let root = arena.push(root_label(source, &bounds, registry.len(), 0));
        frontier.push(root, arena.get(root));

        let termination = loop {
            if self.options.is_cancelled() {
                break Termination::Cancelled;
            }
            let Some(id) = frontier.pop() else {
                break Termination::Exhausted;
            };

            if arena.get(id).validated < registry.len()
                && !revalidate(self.graph, &registry, &mut arena, id, theta)
            {
                stats.pruned_by_overlap += 1;
                continue;
            }

            let label = arena.get(id);
            if label.node == target {
                let nodes = arena.trace(id);
                if registry.contains_route(&nodes) {
                    continue;
                }
                let index = registry.accept(Path::new(nodes, label.length));
                debug!(
                    "accepted path #{} (length {:.3}) after expanding {} labels",
                    index, label.length, stats.labels_expanded
                );
                if registry.len() == k {
                    break Termination::Completed;
                }
                continue;
            }

            if !admit_to_skyline(&mut skyline, label, &mut stats) {
                continue;
            }

            expand(
                self.graph,
                &bounds,
                &registry,
                theta,
                &mut arena,
                &mut frontier,
                id,
                &mut stats,
            );
        };

        stats.labels_created = arena.len();
        stats.skyline_entries = skyline.len();
        debug!(
            "search {:?} finished with {} of {} paths: {:?}",
            self.rule,
            registry.len(),
            k,
            stats
        );
        SearchOutcome::new(registry.into_paths(), termination, stats)
    }
}

/// Fold accepted paths the label has not yet been checked against into its
/// overlap vector. Returns `false` when some overlap now exceeds `theta`.
fn revalidate(
    graph: &Graph,
    registry: &AcceptedPaths,
    arena: &mut LabelArena,
    id: LabelId,
    theta: f64,
) -> bool {
    let nodes = arena.trace(id);
    let label = arena.get_mut(id);
    let first = label.validated;
    label.validated = registry.len();

    nodes.windows(2).all(|pair| {
        let weight = graph.edge_weight(pair[0], pair[1]).unwrap_or(0.0);
        registry.add_edge_overlap(pair[0], pair[1], weight, first, &mut label.overlaps, theta)
    })
}

/// Queue every admissible one-edge extension of label `id`.
///
/// Extensions that revisit a node on the label's chain, cannot reach the
/// target, or overlap an accepted path by more than `theta` are dropped.
#[allow(clippy::too_many_arguments)]
pub(crate) fn expand(
    graph: &Graph,
    bounds: &[f64],
    registry: &AcceptedPaths,
    theta: f64,
    arena: &mut LabelArena,
    frontier: &mut Frontier,
    id: LabelId,
    stats: &mut SearchStats,
) {
    let (node, length, overlaps) = {
        let label = arena.get(id);
        (label.node, label.length, label.overlaps.clone())
    };

    for edge in graph.neighbours(node) {
        if arena.chain_contains(id, edge.node) {
            continue;
        }
        let child_length = length + edge.weight;
        let lower_bound = child_length + bounds[edge.node];
        if !lower_bound.is_finite() {
            continue;
        }

        let mut child_overlaps = overlaps.clone();
        if !registry.add_edge_overlap(node, edge.node, edge.weight, 0, &mut child_overlaps, theta)
        {
            stats.pruned_by_overlap += 1;
            continue;
        }

        let child = arena.push(Label {
            node: edge.node,
            length: child_length,
            lower_bound,
            parent: Some(id),
            overlaps: child_overlaps,
            validated: registry.len(),
        });
        frontier.push(child, arena.get(child));
    }
}

/// Skyline check for a popped label. Records the label and returns `true`
/// when no stored entry dominates it.
pub(crate) fn admit_to_skyline(
    skyline: &mut Skyline,
    label: &Label,
    stats: &mut SearchStats,
) -> bool {
    if skyline.dominates(label.node, label.length, &label.overlaps) {
        stats.pruned_by_dominance += 1;
        return false;
    }
    skyline.insert(label.node, label.length, &label.overlaps);
    stats.labels_expanded += 1;
    true
}

/// Root label for a search from `source` with `slots` zeroed overlap components.
pub(crate) fn root_label(source: NodeId, bounds: &[f64], slots: usize, validated: usize) -> Label {
    Label::root(source, bounds[source], slots, validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{braided_graph, bridge_graph, square_graph};

    fn query(source: NodeId, target: NodeId, k: usize, theta: f64) -> KspQuery {
        KspQuery::new(source, target, k, theta)
    }

    #[test]
    fn square_yields_both_disjoint_routes() {
        let outcome = onepass_plus(&square_graph(), &query(0, 3, 2, 0.5), &SearchOptions::default());
        let routes: Vec<_> = outcome.paths.iter().map(|p| p.nodes().to_vec()).collect();
        assert_eq!(routes, vec![vec![0, 1, 3], vec![0, 2, 3]]);
        assert_eq!(outcome.termination, Termination::Completed);
    }

    #[test]
    fn asking_for_more_routes_than_exist_returns_fewer() {
        let outcome = onepass_plus(&square_graph(), &query(0, 3, 3, 0.5), &SearchOptions::default());
        assert_eq!(outcome.paths.len(), 2);
        assert_eq!(outcome.termination, Termination::Exhausted);
        assert!(outcome.stats.pruned_by_overlap > 0);
    }

    #[test]
    fn zero_theta_with_shared_bridge_keeps_witness_only() {
        let outcome = onepass_plus(&bridge_graph(), &query(0, 5, 3, 0.0), &SearchOptions::default());
        assert_eq!(outcome.paths.len(), 1);
        assert_eq!(outcome.paths[0].nodes(), &[0, 1, 3, 4, 5]);
        assert_eq!(outcome.termination, Termination::Exhausted);
    }

    #[test]
    fn length_aware_variant_agrees_on_square() {
        let plus = onepass_plus(&square_graph(), &query(0, 3, 2, 0.5), &SearchOptions::default());
        let plain = onepass(&square_graph(), &query(0, 3, 2, 0.5), &SearchOptions::default());
        assert_eq!(plus.paths, plain.paths);
    }

    /// Witness `0-1-4`, then `0-2-4`. The label at 3 is queued through the
    /// heavy `0-2` edge before `0-2-4` is accepted.
    fn fork_graph() -> Graph {
        Graph::from_edges(
            5,
            [
                (0, 1, 1.0),
                (1, 4, 1.0),
                (0, 2, 2.0),
                (2, 4, 1.0),
                (2, 3, 1.0),
                (3, 4, 1.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn labels_queued_before_an_acceptance_are_revalidated_on_pop() {
        let outcome = onepass_plus(&fork_graph(), &query(0, 4, 3, 0.5), &SearchOptions::default());
        let routes: Vec<_> = outcome.paths.iter().map(|p| p.nodes().to_vec()).collect();
        assert_eq!(routes, vec![vec![0, 1, 4], vec![0, 2, 4]]);
        assert_eq!(outcome.termination, Termination::Exhausted);
        // `1 -> 4` at expansion time, then the stale label at 3 when popped.
        assert_eq!(outcome.stats.pruned_by_overlap, 2);

        let plain = onepass(&fork_graph(), &query(0, 4, 3, 0.5), &SearchOptions::default());
        assert_eq!(plain.paths, outcome.paths);
    }

    #[test]
    fn huge_k_only_sizes_overlaps_to_accepted_paths() {
        for k in [usize::MAX, 1 << 40] {
            let plus = onepass_plus(&square_graph(), &query(0, 3, k, 0.5), &SearchOptions::default());
            assert_eq!(plus.paths.len(), 2);
            assert_eq!(plus.termination, Termination::Exhausted);

            let plain = onepass(&square_graph(), &query(0, 3, k, 0.5), &SearchOptions::default());
            assert_eq!(plain.paths.len(), 2);
            assert_eq!(plain.termination, Termination::Exhausted);
        }
    }

    #[test]
    fn full_theta_never_repeats_a_path() {
        let outcome = onepass_plus(&braided_graph(), &query(0, 3, 4, 1.0), &SearchOptions::default());
        assert!(outcome.paths.len() >= 2);
        for (i, a) in outcome.paths.iter().enumerate() {
            for b in &outcome.paths[i + 1..] {
                assert_ne!(a.nodes(), b.nodes());
            }
        }
    }
}
