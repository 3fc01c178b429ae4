use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the kspwlo library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// No graph source was provided.
    #[error("no graph source given; define the graph file")]
    MissingGraphSource,

    /// Graph file could not be located at the resolved path.
    #[error("graph file not found at {path}")]
    GraphNotFound { path: PathBuf },

    /// Raised when a graph file line cannot be interpreted.
    #[error("failed to parse graph at line {line}: {message}")]
    GraphParse { line: u64, message: String },

    /// Raised when an edge references a node outside the declared node range.
    #[error("node {node} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange { node: NodeId, node_count: usize },

    /// Raised when an edge weight is negative, NaN, or infinite.
    #[error("edge {from} -> {to} has invalid weight {weight}; weights must be finite and >= 0")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },

    /// Raised when the requested number of paths is zero.
    #[error("k must be at least 1 (got {k})")]
    InvalidK { k: usize },

    /// Raised when the overlap threshold lies outside [0, 1].
    #[error("theta must lie within [0, 1] (got {theta})")]
    InvalidTheta { theta: f64 },

    /// Raised when the source and the target are the same node.
    #[error("source and target are the same node ({node})")]
    SameSourceTarget { node: NodeId },

    /// Raised when a query references a node the graph does not contain.
    #[error("unknown node {node}; the graph has {node_count} nodes")]
    UnknownNode { node: NodeId, node_count: usize },

    /// Raised when an algorithm name does not match any known planner.
    #[error("unknown algorithm: {name}{}", format_suggestions(.suggestions))]
    UnknownAlgorithm {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a computed path fails verification against the graph.
    #[error("computed path #{index} is corrupt: {reason}")]
    CorruptPath { index: usize, reason: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV reader errors raised while reading a graph file.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Process exit code a host should use when aborting on this error.
    ///
    /// Codes 1-4 match the legacy argument checks (graph source, k, theta,
    /// source == target).
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::MissingGraphSource
            | Error::GraphNotFound { .. }
            | Error::GraphParse { .. }
            | Error::NodeOutOfRange { .. }
            | Error::InvalidWeight { .. }
            | Error::Io(_)
            | Error::Csv(_) => 1,
            Error::InvalidK { .. } => 2,
            Error::InvalidTheta { .. } => 3,
            Error::SameSourceTarget { .. } => 4,
            Error::UnknownNode { .. } => 5,
            Error::UnknownAlgorithm { .. } => 6,
            Error::CorruptPath { .. } => 7,
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
