//! Common test utilities and fixture helpers.

use std::fs;
use std::path::PathBuf;

use kspwlo_lib::{load_graph, Graph};
use tempfile::TempDir;

/// Path to the fixtures directory shared with the CLI tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load one of the graph fixtures by file name.
pub fn load_fixture(name: &str) -> Graph {
    load_graph(&fixtures_dir().join(name)).expect("fixture graph loads")
}

/// Graph file written into a temporary directory that lives as long as the value.
#[allow(dead_code)]
pub struct TempGraph {
    _dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TempGraph {
    pub fn new(contents: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("graph.gr");
        fs::write(&path, contents).expect("write graph file");
        Self { _dir: dir, path }
    }
}
