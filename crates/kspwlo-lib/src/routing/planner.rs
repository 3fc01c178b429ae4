//! Path planning strategies implementing the Strategy pattern.
//!
//! This module provides the `PathPlanner` trait and one implementation per
//! [`Algorithm`]. The orchestrator in the parent module only talks to the
//! trait, so adding an algorithm does not touch it.

use crate::graph::Graph;

use super::engine::{onepass, onepass_plus};
use super::esx::esx;
use super::multipass::multipass;
use super::svp_plus::svp_plus;
use super::{Algorithm, KspQuery, SearchOptions, SearchOutcome};

/// Trait for alternative-route strategies.
pub trait PathPlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> Algorithm;

    /// Run the search. Inputs are assumed to be validated already.
    fn find_paths(&self, graph: &Graph, query: &KspQuery, options: &SearchOptions)
        -> SearchOutcome;

    /// Whether each returned path is the shortest one satisfying the overlap
    /// threshold against the paths before it.
    fn is_exact(&self) -> bool {
        self.algorithm().is_exact()
    }
}

/// Exact single-pass search with length-aware dominance.
#[derive(Debug, Clone, Default)]
pub struct OnePassPlanner;

impl PathPlanner for OnePassPlanner {
    fn algorithm(&self) -> Algorithm {
        Algorithm::OnePass
    }

    fn find_paths(
        &self,
        graph: &Graph,
        query: &KspQuery,
        options: &SearchOptions,
    ) -> SearchOutcome {
        onepass(graph, query, options)
    }
}

/// Exact search restarted from scratch for every path.
#[derive(Debug, Clone, Default)]
pub struct MultiPassPlanner;

impl PathPlanner for MultiPassPlanner {
    fn algorithm(&self) -> Algorithm {
        Algorithm::MultiPass
    }

    fn find_paths(
        &self,
        graph: &Graph,
        query: &KspQuery,
        options: &SearchOptions,
    ) -> SearchOutcome {
        multipass(graph, query, options)
    }
}

/// Single-pass search with lazy revalidation. The default planner.
#[derive(Debug, Clone, Default)]
pub struct OnePassPlusPlanner;

impl PathPlanner for OnePassPlusPlanner {
    fn algorithm(&self) -> Algorithm {
        Algorithm::OnePassPlus
    }

    fn find_paths(
        &self,
        graph: &Graph,
        query: &KspQuery,
        options: &SearchOptions,
    ) -> SearchOutcome {
        onepass_plus(graph, query, options)
    }
}

/// Via-node heuristic built from two shortest-path trees.
#[derive(Debug, Clone, Default)]
pub struct SvpPlusPlanner;

impl PathPlanner for SvpPlusPlanner {
    fn algorithm(&self) -> Algorithm {
        Algorithm::SvpPlus
    }

    fn find_paths(
        &self,
        graph: &Graph,
        query: &KspQuery,
        options: &SearchOptions,
    ) -> SearchOutcome {
        svp_plus(graph, query, options)
    }
}

/// Edge-exclusion heuristic.
#[derive(Debug, Clone, Default)]
pub struct EsxPlanner;

impl PathPlanner for EsxPlanner {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Esx
    }

    fn find_paths(
        &self,
        graph: &Graph,
        query: &KspQuery,
        options: &SearchOptions,
    ) -> SearchOutcome {
        esx(graph, query, options)
    }
}

/// Select the planner for `algorithm`.
pub fn select_planner(algorithm: Algorithm) -> Box<dyn PathPlanner> {
    match algorithm {
        Algorithm::OnePass => Box::new(OnePassPlanner),
        Algorithm::MultiPass => Box::new(MultiPassPlanner),
        Algorithm::OnePassPlus => Box::new(OnePassPlusPlanner),
        Algorithm::SvpPlus => Box::new(SvpPlusPlanner),
        Algorithm::Esx => Box::new(EsxPlanner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_planner_chooses_matching_type() {
        for algorithm in Algorithm::ALL {
            assert_eq!(select_planner(algorithm).algorithm(), algorithm);
        }
    }

    #[test]
    fn only_onepass_and_multipass_are_exact() {
        assert!(OnePassPlanner.is_exact());
        assert!(MultiPassPlanner.is_exact());
        assert!(!OnePassPlusPlanner.is_exact());
        assert!(!SvpPlusPlanner.is_exact());
        assert!(!EsxPlanner.is_exact());
    }
}
