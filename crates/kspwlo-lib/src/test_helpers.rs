//! Small graphs shared by unit tests.

use crate::graph::Graph;

/// Two disjoint unit-weight routes `0 → 1 → 3` and `0 → 2 → 3`.
pub(crate) fn square_graph() -> Graph {
    Graph::from_edges(4, [(0, 1, 1.0), (1, 3, 1.0), (0, 2, 1.0), (2, 3, 1.0)])
        .expect("square graph is valid")
}

/// The square plus a `1 → 2` shortcut and a `3 → 1` back edge.
pub(crate) fn braided_graph() -> Graph {
    Graph::from_edges(
        4,
        [
            (0, 1, 1.0),
            (1, 3, 1.0),
            (0, 2, 1.0),
            (2, 3, 1.0),
            (3, 1, 1.0),
            (1, 2, 0.5),
        ],
    )
    .expect("braided graph is valid")
}

/// Every `0 → 5` route crosses the `3 → 4 → 5` tail.
pub(crate) fn bridge_graph() -> Graph {
    Graph::from_edges(
        6,
        [
            (0, 1, 1.0),
            (0, 2, 2.0),
            (1, 3, 1.0),
            (2, 3, 1.0),
            (3, 4, 1.0),
            (4, 5, 1.0),
        ],
    )
    .expect("bridge graph is valid")
}
