//! Named graph families used as fixtures.

use crate::graph::Graph;

/// `n` isolated vertices.
pub fn empty(n: usize) -> Graph {
    Graph::new(n)
}

/// The complete graph K_n.
pub fn complete(n: usize) -> Graph {
    let edges = (0..n).flat_map(|u| ((u + 1)..n).map(move |v| (u, v)));
    build(n, edges)
}

/// The path P_n on `n` vertices (`n - 1` edges).
pub fn path(n: usize) -> Graph {
    build(n, (1..n).map(|u| (u - 1, u)))
}

/// The cycle C_n. For `n < 3` there is no simple cycle; the path is returned.
pub fn cycle(n: usize) -> Graph {
    let closing = (n >= 3).then(|| (n - 1, 0));
    build(n, (1..n).map(|u| (u - 1, u)).chain(closing))
}

/// The Petersen graph: outer 5-cycle `0..5`, inner pentagram `5..10`, and
/// spokes `i -- i + 5`.
pub fn petersen() -> Graph {
    let edges = (0..5).flat_map(|i| {
        [
            (i, (i + 1) % 5),
            (5 + i, 5 + (i + 2) % 5),
            (i, i + 5),
        ]
    });
    build(10, edges)
}

/// Every family above generates distinct in-range endpoints.
fn build(order: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Graph {
    Graph::from_edges(order, edges).expect("valid fixture")
}
