//! Info command handler: basic statistics about a graph file.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use kspwlo_cli::output::{to_json_line, OutputFormat};
use kspwlo_lib::Graph;

use super::{load_graph_from, require_graph_path};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GraphInfo {
    pub nodes: usize,
    pub edges: usize,
    pub isolated_nodes: usize,
    pub max_out_degree: usize,
}

impl GraphInfo {
    pub fn from_graph(graph: &Graph) -> Self {
        let max_out_degree = (0..graph.node_count())
            .map(|node| graph.neighbours(node).len())
            .max()
            .unwrap_or(0);
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            isolated_nodes: graph.isolated_nodes(),
            max_out_degree,
        }
    }

    fn render_text(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "nodes: {}", self.nodes);
        let _ = writeln!(buffer, "edges: {}", self.edges);
        let _ = writeln!(buffer, "isolated nodes: {}", self.isolated_nodes);
        let _ = writeln!(buffer, "max out-degree: {}", self.max_out_degree);
        buffer
    }
}

/// Handle the info subcommand.
pub fn handle_info_command(graph_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let graph = load_graph_from(require_graph_path(graph_path)?)?;
    let info = GraphInfo::from_graph(&graph);
    match format {
        OutputFormat::Json => print!("{}", to_json_line(&info)?),
        OutputFormat::Text | OutputFormat::Legacy => print!("{}", info.render_text()),
    }
    Ok(())
}
