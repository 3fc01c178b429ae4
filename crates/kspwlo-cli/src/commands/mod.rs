// Module exports for CLI subcommands.
//
// Each module handles one subcommand; main.rs only parses arguments and
// dispatches here.

pub mod info;
pub mod paths;

use std::path::Path;

use anyhow::{Context, Result};
use kspwlo_lib::{load_graph, Error as LibError, Graph};

/// The graph named by `--graph` / `KSPWLO_GRAPH`, or a missing-source error.
pub(crate) fn require_graph_path(graph_path: Option<&Path>) -> Result<&Path> {
    Ok(graph_path.ok_or(LibError::MissingGraphSource)?)
}

pub(crate) fn load_graph_from(graph_path: &Path) -> Result<Graph> {
    load_graph(graph_path)
        .with_context(|| format!("failed to load graph from {}", graph_path.display()))
}
