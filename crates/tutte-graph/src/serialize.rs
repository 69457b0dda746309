//! Adjacency-matrix text encoding for the engine's stdin.

use crate::error::GraphError;
use crate::graph::{AdjacencySource, Graph};

/// Encode `graph` as `n` followed by its `n * n` row-major 0/1 adjacency
/// entries, separated by single spaces.
///
/// Rows and columns are both walked in ascending vertex order, so a symmetric
/// relation yields a symmetric matrix. The simple/loopless precondition is not
/// checked here; see [`serialize_checked`].
pub fn serialize<G: AdjacencySource + ?Sized>(graph: &G) -> String {
    let n = graph.order();
    // "n" plus one "0"/"1" and a separator per entry
    let mut out = String::with_capacity(n.to_string().len() + 2 * n * n);
    out.push_str(&n.to_string());
    for u in 0..n {
        for v in 0..n {
            out.push(' ');
            out.push(if graph.has_edge(u, v) { '1' } else { '0' });
        }
    }
    tracing::debug!(order = n, tokens = 1 + n * n, "serialized adjacency matrix");
    out
}

/// Like [`serialize`], but first verifies the source is loopless and
/// symmetric.
pub fn serialize_checked<G: AdjacencySource + ?Sized>(graph: &G) -> Result<String, GraphError> {
    validate(graph)?;
    Ok(serialize(graph))
}

fn validate<G: AdjacencySource + ?Sized>(graph: &G) -> Result<(), GraphError> {
    let n = graph.order();
    for u in 0..n {
        if graph.has_edge(u, u) {
            return Err(GraphError::SelfLoop { vertex: u });
        }
        for v in (u + 1)..n {
            match (graph.has_edge(u, v), graph.has_edge(v, u)) {
                (true, false) => return Err(GraphError::Asymmetric { u, v }),
                (false, true) => return Err(GraphError::Asymmetric { u: v, v: u }),
                _ => {}
            }
        }
    }
    Ok(())
}

/// Decode adjacency-matrix text back into a [`Graph`].
///
/// Accepts any whitespace between tokens. The matrix must hold exactly
/// `n * n` entries of `0` or `1`, be symmetric, and have a zero diagonal.
pub fn parse_adjacency_matrix(text: &str) -> Result<Graph, GraphError> {
    let mut tokens = text.split_whitespace();
    let order_token = tokens.next().ok_or(GraphError::EmptyMatrix)?;
    let n: usize = order_token
        .parse()
        .map_err(|_| GraphError::InvalidOrder {
            token: order_token.to_string(),
        })?;

    let entries: Vec<&str> = tokens.collect();
    let expected = n.checked_mul(n).ok_or_else(|| GraphError::InvalidOrder {
        token: order_token.to_string(),
    })?;
    if entries.len() != expected {
        return Err(GraphError::MatrixTokenCount {
            order: n,
            expected,
            found: entries.len(),
        });
    }

    let mut matrix = vec![vec![false; n]; n];
    for (index, token) in entries.iter().enumerate() {
        let (row, column) = (index / n, index % n);
        matrix[row][column] = match *token {
            "0" => false,
            "1" => true,
            _ => {
                return Err(GraphError::InvalidMatrixEntry {
                    row,
                    column,
                    token: token.to_string(),
                })
            }
        };
    }
    validate(&matrix)?;

    let edges = (0..n).flat_map(|u| ((u + 1)..n).map(move |v| (u, v)));
    Graph::from_edges(n, edges.filter(|&(u, v)| matrix[u][v]))
}
