//! MultiPass: one fresh best-first search per requested path.
//!
//! Every pass starts from the source with the full set of accepted paths
//! already known, so no label ever needs revalidation. Skyline dominance also
//! compares lengths.

use tracing::debug;

use crate::graph::Graph;
use crate::path::Path;
use crate::search::shortest_path_and_bounds;
use crate::skyline::{DominanceRule, Skyline};

use super::engine::{admit_to_skyline, expand, root_label};
use super::label::{Frontier, LabelArena};
use super::registry::AcceptedPaths;
use super::{KspQuery, SearchOptions, SearchOutcome, SearchStats, Termination};

enum Pass {
    Found(Path),
    Exhausted,
    Cancelled,
}

pub fn multipass(graph: &Graph, query: &KspQuery, options: &SearchOptions) -> SearchOutcome {
    let Some((witness, bounds)) = shortest_path_and_bounds(graph, query.source, query.target)
    else {
        debug!("target {} is unreachable from {}", query.target, query.source);
        return SearchOutcome::unreachable();
    };

    let mut registry = AcceptedPaths::new();
    registry.accept(witness);
    let mut stats = SearchStats::default();

    let termination = loop {
        if registry.len() == query.k {
            break Termination::Completed;
        }
        match run_pass(graph, query, options, &bounds, &registry, &mut stats) {
            Pass::Found(path) => {
                let index = registry.accept(path);
                debug!("pass accepted path #{}", index);
            }
            Pass::Exhausted => break Termination::Exhausted,
            Pass::Cancelled => break Termination::Cancelled,
        }
    };

    SearchOutcome::new(registry.into_paths(), termination, stats)
}

fn run_pass(
    graph: &Graph,
    query: &KspQuery,
    options: &SearchOptions,
    bounds: &[f64],
    registry: &AcceptedPaths,
    stats: &mut SearchStats,
) -> Pass {
    let mut arena = LabelArena::default();
    let mut frontier = Frontier::default();
    let mut skyline = Skyline::new(graph.node_count(), DominanceRule::LengthAndOverlap);

    let root = arena.push(root_label(query.source, bounds, registry.len(), registry.len()));
    frontier.push(root, arena.get(root));

    let pass = loop {
        if options.is_cancelled() {
            break Pass::Cancelled;
        }
        let Some(id) = frontier.pop() else {
            break Pass::Exhausted;
        };

        let label = arena.get(id);
        if label.node == query.target {
            let nodes = arena.trace(id);
            if registry.contains_route(&nodes) {
                continue;
            }
            break Pass::Found(Path::new(nodes, label.length));
        }

        if !admit_to_skyline(&mut skyline, label, stats) {
            continue;
        }
        expand(
            graph,
            bounds,
            registry,
            query.theta,
            &mut arena,
            &mut frontier,
            id,
            stats,
        );
    };

    stats.labels_created += arena.len();
    stats.skyline_entries += skyline.len();
    pass
}
