//! k-shortest paths with limited overlap.
//!
//! This module provides:
//! - [`Algorithm`] - Supported alternative-route algorithms
//! - [`KspQuery`] - Source, target, `k` and the overlap threshold `theta`
//! - [`SearchOptions`] - Run-time knobs such as cooperative cancellation
//! - [`AlternativeRoutes`] - Verified result set plus search diagnostics
//! - [`k_shortest_paths`] - Main entry point over an in-memory graph
//! - [`k_shortest_paths_from_file`] - Legacy row-based entry point
//!
//! # Strategy Pattern
//!
//! Each algorithm is wrapped in a [`PathPlanner`] implementation and chosen
//! through [`select_planner`], so the orchestration below never matches on
//! the algorithm itself.
//!
//! # Example
//!
//! ```no_run
//! use kspwlo_lib::{k_shortest_paths, load_graph, Algorithm, KspQuery};
//!
//! let graph = load_graph(std::path::Path::new("docs/fixtures/sample.gr"))?;
//! let query = KspQuery::new(0, 3, 3, 0.5);
//! let routes = k_shortest_paths(&graph, Algorithm::OnePassPlus, &query)?;
//! println!("{} alternative routes", routes.len());
//! # Ok::<(), kspwlo_lib::Error>(())
//! ```

mod engine;
mod esx;
mod label;
mod multipass;
mod planner;
mod registry;
mod svp_plus;

pub use engine::{onepass, onepass_plus};
pub use esx::esx;
pub use multipass::multipass;
pub use planner::{
    select_planner, EsxPlanner, MultiPassPlanner, OnePassPlanner, OnePassPlusPlanner, PathPlanner,
    SvpPlusPlanner,
};
pub use svp_plus::svp_plus;

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::network::load_graph;
use crate::path::Path;

/// Similarity a name must reach before it is offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Supported alternative-route algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum Algorithm {
    /// Single best-first pass; dominance also compares lengths.
    #[serde(rename = "op")]
    OnePass,
    /// One fresh best-first pass per path.
    #[serde(rename = "mp")]
    MultiPass,
    /// Single pass with lazy revalidation and overlap-only dominance.
    #[default]
    #[serde(rename = "opplus")]
    OnePassPlus,
    /// Single-via-path heuristic.
    #[serde(rename = "svp")]
    SvpPlus,
    /// Edge-exclusion heuristic.
    #[serde(rename = "esx")]
    Esx,
}

impl Algorithm {
    /// Every algorithm, in the order they are listed to users.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::OnePass,
        Algorithm::MultiPass,
        Algorithm::OnePassPlus,
        Algorithm::SvpPlus,
        Algorithm::Esx,
    ];

    /// Short name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::OnePass => "op",
            Algorithm::MultiPass => "mp",
            Algorithm::OnePassPlus => "opplus",
            Algorithm::SvpPlus => "svp",
            Algorithm::Esx => "esx",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Algorithm::OnePass => &["onepass"],
            Algorithm::MultiPass => &["multipass"],
            Algorithm::OnePassPlus => &["onepass-plus", "onepass_plus"],
            Algorithm::SvpPlus => &["svp-plus", "svp_plus"],
            Algorithm::Esx => &[],
        }
    }

    /// Whether the algorithm returns, at every step, the shortest path that
    /// satisfies the overlap threshold.
    pub fn is_exact(self) -> bool {
        matches!(self, Algorithm::OnePass | Algorithm::MultiPass)
    }

    /// Algorithm names resembling `name`, best match first.
    pub fn fuzzy_matches(name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_ascii_lowercase();
        let mut scored: Vec<(f64, Algorithm)> = Algorithm::ALL
            .iter()
            .map(|&algorithm| {
                let score = std::iter::once(algorithm.name())
                    .chain(algorithm.aliases().iter().copied())
                    .map(|candidate| strsim::jaro_winkler(&needle, candidate))
                    .fold(0.0, f64::max);
                (score, algorithm)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, algorithm)| algorithm.name().to_string())
            .collect()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Algorithm::ALL
            .iter()
            .copied()
            .find(|algorithm| {
                value.eq_ignore_ascii_case(algorithm.name())
                    || algorithm
                        .aliases()
                        .iter()
                        .any(|alias| value.eq_ignore_ascii_case(alias))
            })
            .ok_or_else(|| Error::UnknownAlgorithm {
                name: value.to_string(),
                suggestions: Algorithm::fuzzy_matches(value, 3),
            })
    }
}

/// One alternative-route request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KspQuery {
    pub source: NodeId,
    pub target: NodeId,
    /// Maximum number of paths to return.
    pub k: usize,
    /// Largest admissible overlap ratio with any earlier path, inclusive.
    pub theta: f64,
}

impl KspQuery {
    pub fn new(source: NodeId, target: NodeId, k: usize, theta: f64) -> Self {
        Self {
            source,
            target,
            k,
            theta,
        }
    }

    /// Argument checks that do not need a graph, in legacy order: `k`, then
    /// `theta`, then source/target.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidK { k: self.k });
        }
        if !(0.0..=1.0).contains(&self.theta) {
            return Err(Error::InvalidTheta { theta: self.theta });
        }
        if self.source == self.target {
            return Err(Error::SameSourceTarget { node: self.source });
        }
        Ok(())
    }

    /// [`validate`](Self::validate) plus a range check of both endpoints.
    pub fn validate_for(&self, graph: &Graph) -> Result<()> {
        self.validate()?;
        for node in [self.source, self.target] {
            if !graph.contains(node) {
                return Err(Error::UnknownNode {
                    node,
                    node_count: graph.node_count(),
                });
            }
        }
        Ok(())
    }
}

/// Run-time options shared by every planner.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Checked between queue pops; once set, the search stops and returns
    /// the paths accepted so far.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SearchOptions {
    pub fn with_cancel_flag(flag: Arc<AtomicBool>) -> Self {
        Self { cancel: Some(flag) }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// `k` paths were found.
    Completed,
    /// The search space ran out before `k` paths were found.
    Exhausted,
    /// The target cannot be reached from the source.
    Unreachable,
    /// The cancel flag was raised.
    Cancelled,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Termination::Completed => "completed",
            Termination::Exhausted => "exhausted",
            Termination::Unreachable => "unreachable",
            Termination::Cancelled => "cancelled",
        };
        f.write_str(value)
    }
}

/// Counters describing how much work a search did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub labels_created: usize,
    pub labels_expanded: usize,
    pub pruned_by_overlap: usize,
    pub pruned_by_dominance: usize,
    pub skyline_entries: usize,
}

/// Raw planner output before verification.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub paths: Vec<Path>,
    pub termination: Termination,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub(crate) fn new(paths: Vec<Path>, termination: Termination, stats: SearchStats) -> Self {
        Self {
            paths,
            termination,
            stats,
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self::new(Vec::new(), Termination::Unreachable, SearchStats::default())
    }
}

/// Verified alternative routes returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct AlternativeRoutes {
    pub algorithm: Algorithm,
    pub query: KspQuery,
    pub paths: Vec<Path>,
    pub termination: Termination,
    pub stats: SearchStats,
}

impl AlternativeRoutes {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Legacy rows: `[length, n0, ..., nn]` per path, shortest first.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.paths.iter().map(Path::to_row).collect()
    }
}

/// Compute up to `query.k` alternative routes with default options.
pub fn k_shortest_paths(
    graph: &Graph,
    algorithm: Algorithm,
    query: &KspQuery,
) -> Result<AlternativeRoutes> {
    k_shortest_paths_with_options(graph, algorithm, query, &SearchOptions::default())
}

/// Compute up to `query.k` alternative routes.
///
/// Every returned path is checked against the graph before it is handed out;
/// a mismatch surfaces as [`Error::CorruptPath`].
pub fn k_shortest_paths_with_options(
    graph: &Graph,
    algorithm: Algorithm,
    query: &KspQuery,
    options: &SearchOptions,
) -> Result<AlternativeRoutes> {
    query.validate_for(graph)?;

    let planner = select_planner(algorithm);
    debug!(
        "running {} from {} to {} (k = {}, theta = {})",
        planner.algorithm(),
        query.source,
        query.target,
        query.k,
        query.theta
    );
    let outcome = planner.find_paths(graph, query, options);

    for (index, path) in outcome.paths.iter().enumerate() {
        path.verify(graph, index)?;
    }

    Ok(AlternativeRoutes {
        algorithm,
        query: *query,
        paths: outcome.paths,
        termination: outcome.termination,
        stats: outcome.stats,
    })
}

/// Load a graph file and return legacy rows for the alternative routes.
///
/// Arguments are checked in legacy order (graph source, `k`, `theta`,
/// source/target, algorithm name) before the file is read, so
/// [`Error::exit_code`] matches the historical exit statuses.
pub fn k_shortest_paths_from_file(
    graph_source: impl AsRef<std::path::Path>,
    k: usize,
    theta: f64,
    source: NodeId,
    target: NodeId,
    algorithm: &str,
) -> Result<Vec<Vec<f64>>> {
    let graph_source = graph_source.as_ref();
    if graph_source.as_os_str().is_empty() {
        return Err(Error::MissingGraphSource);
    }
    let query = KspQuery::new(source, target, k, theta);
    query.validate()?;
    let algorithm: Algorithm = algorithm.parse()?;

    let graph = load_graph(graph_source)?;
    let routes = k_shortest_paths(&graph, algorithm, &query)?;
    Ok(routes.to_rows())
}
