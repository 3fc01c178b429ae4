use std::fmt::Write;

use serde::Serialize;

use crate::graph::{Graph, NodeId};
use crate::routing::{AlternativeRoutes, Algorithm, SearchStats, Termination};

/// Presentation style for turning a [`RouteSetSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    PlainText,
    /// `Length: <length> | <n0> <n1> ...`, one line per path.
    Legacy,
}

/// One path within a summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEntry {
    pub index: usize,
    pub length: f64,
    pub hops: usize,
    pub nodes: Vec<NodeId>,
    /// Largest overlap ratio against any earlier path; absent for the first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_overlap: Option<f64>,
}

/// Structured representation of a result set that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSetSummary {
    pub algorithm: Algorithm,
    pub source: NodeId,
    pub target: NodeId,
    pub k: usize,
    pub theta: f64,
    pub termination: Termination,
    pub stats: SearchStats,
    pub routes: Vec<RouteEntry>,
}

impl RouteSetSummary {
    pub fn from_routes(graph: &Graph, routes: &AlternativeRoutes) -> Self {
        let entries = routes
            .paths
            .iter()
            .enumerate()
            .map(|(index, path)| {
                let max_overlap = routes.paths[..index]
                    .iter()
                    .map(|earlier| earlier.overlap_ratio(path, graph))
                    .reduce(f64::max);
                RouteEntry {
                    index,
                    length: path.length(),
                    hops: path.hops(),
                    nodes: path.nodes().to_vec(),
                    max_overlap,
                }
            })
            .collect();

        Self {
            algorithm: routes.algorithm,
            source: routes.query.source,
            target: routes.query.target,
            k: routes.query.k,
            theta: routes.query.theta,
            termination: routes.termination,
            stats: routes.stats,
            routes: entries,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::PlainText => self.render_plain(),
            RenderMode::Legacy => self.render_legacy(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{} of {} paths from {} to {} (algorithm: {}, theta: {}, {})",
            self.routes.len(),
            self.k,
            self.source,
            self.target,
            self.algorithm,
            self.theta,
            self.termination
        );
        for route in &self.routes {
            let overlap = route
                .max_overlap
                .map_or_else(|| "-".to_string(), |ratio| format!("{ratio:.3}"));
            let _ = writeln!(
                buffer,
                "{:>3}: length {} ({} hops, max overlap {}): {}",
                route.index,
                route.length,
                route.hops,
                overlap,
                join_nodes(&route.nodes, " -> ")
            );
        }
        buffer
    }

    fn render_legacy(&self) -> String {
        let mut buffer = String::new();
        for route in &self.routes {
            let _ = writeln!(
                buffer,
                "Length: {} | {}",
                route.length,
                join_nodes(&route.nodes, " ")
            );
        }
        buffer
    }
}

fn join_nodes(nodes: &[NodeId], separator: &str) -> String {
    nodes
        .iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{k_shortest_paths, KspQuery};
    use crate::test_helpers::square_graph;

    fn summary() -> RouteSetSummary {
        let graph = square_graph();
        let routes =
            k_shortest_paths(&graph, Algorithm::OnePassPlus, &KspQuery::new(0, 3, 3, 0.5)).unwrap();
        RouteSetSummary::from_routes(&graph, &routes)
    }

    #[test]
    fn first_route_has_no_overlap() {
        let summary = summary();
        assert_eq!(summary.routes[0].max_overlap, None);
        assert_eq!(summary.routes[1].max_overlap, Some(0.0));
        assert_eq!(summary.termination, Termination::Exhausted);
    }

    #[test]
    fn legacy_lines_match_historical_layout() {
        assert_eq!(
            summary().render(RenderMode::Legacy),
            "Length: 2 | 0 1 3\nLength: 2 | 0 2 3\n"
        );
    }

    #[test]
    fn plain_text_lists_every_route() {
        let text = summary().render(RenderMode::PlainText);
        assert!(text.starts_with("2 of 3 paths from 0 to 3 (algorithm: opplus"));
        assert!(text.contains("0 -> 2 -> 3"));
        assert!(text.contains("max overlap -"));
    }
}
