//! Paths command handler for computing alternative routes.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use kspwlo_cli::output::{render_summary, OutputFormat};
use kspwlo_lib::{k_shortest_paths, Algorithm, KspQuery, NodeId, RouteSetSummary};

use super::{load_graph_from, require_graph_path};

/// Arguments for the paths command.
#[derive(Debug, Clone)]
pub struct PathsCommandArgs {
    /// Source node id.
    pub from: NodeId,
    /// Target node id.
    pub to: NodeId,
    /// Maximum number of paths.
    pub k: usize,
    /// Overlap threshold in `[0, 1]`.
    pub theta: f64,
    /// Algorithm name as typed by the user.
    pub algorithm: String,
}

impl PathsCommandArgs {
    pub fn to_query(&self) -> KspQuery {
        KspQuery::new(self.from, self.to, self.k, self.theta)
    }
}

/// Handle the paths subcommand.
///
/// Arguments are validated before the graph is read, so bad input fails fast
/// with the matching exit status.
pub fn handle_paths_command(
    graph_path: Option<&Path>,
    args: &PathsCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let graph_path = require_graph_path(graph_path)?;
    let query = args.to_query();
    query.validate()?;
    let algorithm: Algorithm = args.algorithm.parse()?;

    let graph = load_graph_from(graph_path)?;
    let routes = k_shortest_paths(&graph, algorithm, &query)?;
    if routes.is_empty() {
        warn!("node {} cannot reach node {}", query.source, query.target);
    } else {
        info!(
            "found {} of {} paths ({})",
            routes.len(),
            query.k,
            routes.termination
        );
    }

    let summary = RouteSetSummary::from_routes(&graph, &routes);
    print!("{}", render_summary(&summary, format)?);
    Ok(())
}
