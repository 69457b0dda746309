//! Graph construction and wire-format errors.

use thiserror::Error;

/// Errors raised when a graph violates the simple/loopless/undirected
/// precondition, or when adjacency-matrix text cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {vertex} out of range for graph of order {order}")]
    VertexOutOfRange { vertex: usize, order: usize },

    #[error("self-loop at vertex {vertex}")]
    SelfLoop { vertex: usize },

    #[error("adjacency is not symmetric: ({u}, {v}) present but ({v}, {u}) absent")]
    Asymmetric { u: usize, v: usize },

    #[error("adjacency matrix is empty: missing order token")]
    EmptyMatrix,

    #[error("invalid order token '{token}'")]
    InvalidOrder { token: String },

    #[error("adjacency matrix of order {order} needs {expected} entries, found {found}")]
    MatrixTokenCount {
        order: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid adjacency entry '{token}' at row {row}, column {column}: expected 0 or 1")]
    InvalidMatrixEntry {
        row: usize,
        column: usize,
        token: String,
    },
}
