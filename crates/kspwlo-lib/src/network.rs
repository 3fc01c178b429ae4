//! Plain-text graph loader.
//!
//! The format is whitespace separated. The first record carries the node count
//! and the declared edge count (a third, unused column is tolerated); every
//! following record is one directed edge `<from> <to> <weight>`. Numbers are
//! read as floating point, so ids written as `3.0` are accepted as long as
//! they are non-negative integers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{Graph, GraphBuilder, NodeId};

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_ID: f64 = 9_007_199_254_740_992.0;

/// Load a graph file from disk.
pub fn load_graph(path: &Path) -> Result<Graph> {
    if !path.exists() {
        return Err(Error::GraphNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let graph = parse_graph(file)?;
    debug!(
        "loaded graph from {} ({} nodes, {} edges)",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Parse a graph from any reader (file, in-memory buffer, ...).
pub fn parse_graph<R: Read>(reader: R) -> Result<Graph> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut builder: Option<(GraphBuilder, usize)> = None;
    let mut record = StringRecord::new();

    while csv_reader.read_record(&mut record)? {
        let line = record.position().map_or(0, |position| position.line());
        let fields: Vec<&str> = record.iter().flat_map(str::split_whitespace).collect();
        if fields.is_empty() {
            continue;
        }

        match builder.as_mut() {
            None => {
                let (node_count, declared_edges) = parse_header(&fields, line)?;
                let graph = GraphBuilder::try_new(node_count).map_err(|err| Error::GraphParse {
                    line,
                    message: format!("cannot allocate {node_count} nodes: {err}"),
                })?;
                builder = Some((graph, declared_edges));
            }
            Some((graph, _)) => {
                let &[from, to, weight] = fields.as_slice() else {
                    return Err(Error::GraphParse {
                        line,
                        message: format!(
                            "expected `<from> <to> <weight>`, found {} fields",
                            fields.len()
                        ),
                    });
                };
                let from = parse_id(from, line)?;
                let to = parse_id(to, line)?;
                let weight = parse_number(weight, line)?;
                graph.add_edge(from, to, weight)?;
            }
        }
    }

    let Some((builder, declared_edges)) = builder else {
        return Err(Error::GraphParse {
            line: 1,
            message: "missing `<nodes> <edges>` header".to_string(),
        });
    };

    let graph = builder.build();
    if graph.edge_count() != declared_edges {
        warn!(
            "header declares {} edges but {} distinct edges were read",
            declared_edges,
            graph.edge_count()
        );
    }
    Ok(graph)
}

fn parse_header(fields: &[&str], line: u64) -> Result<(usize, usize)> {
    match fields {
        [nodes, edges] | [nodes, edges, _] => Ok((parse_id(nodes, line)?, parse_id(edges, line)?)),
        _ => Err(Error::GraphParse {
            line,
            message: format!(
                "expected `<nodes> <edges>` header, found {} fields",
                fields.len()
            ),
        }),
    }
}

fn parse_number(field: &str, line: u64) -> Result<f64> {
    field.parse::<f64>().map_err(|_| Error::GraphParse {
        line,
        message: format!("'{field}' is not a number"),
    })
}

/// Parse a non-negative integral value that may be written as a float.
fn parse_id(field: &str, line: u64) -> Result<NodeId> {
    let value = parse_number(field, line)?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > MAX_EXACT_ID {
        return Err(Error::GraphParse {
            line,
            message: format!("'{field}' is not a non-negative integer"),
        });
    }
    Ok(value as NodeId)
}
