//! kspwlo library entry points.
//!
//! This crate loads weighted directed graphs and computes up to `k`
//! alternative source → target paths whose pairwise overlap stays within a
//! threshold `theta`. Higher-level consumers (the CLI, embedding hosts) should
//! only depend on the functions exported here instead of reimplementing
//! behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod network;
pub mod output;
pub mod path;
pub mod routing;
pub mod search;
pub mod skyline;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use error::{Error, Result};
pub use graph::{EdgeKey, Graph, GraphBuilder, Neighbour, NodeId};
pub use network::{load_graph, parse_graph};
pub use output::{RenderMode, RouteEntry, RouteSetSummary};
pub use path::Path;
pub use routing::{
    k_shortest_paths, k_shortest_paths_from_file, k_shortest_paths_with_options, select_planner,
    AlternativeRoutes, Algorithm, KspQuery, PathPlanner, SearchOptions, SearchOutcome,
    SearchStats, Termination,
};
pub use search::{a_star_limited, shortest_path_and_bounds, ShortestPathTree, TreeDirection};
pub use skyline::{DominanceRule, Skyline};
