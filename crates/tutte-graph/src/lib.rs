//! Simple undirected graphs and the adjacency-matrix text protocol spoken by
//! the external Tutte engine.
//!
//! The engine reads a single whitespace-delimited token stream on stdin:
//!
//! ```text
//! n a[0][0] a[0][1] ... a[0][n-1] a[1][0] ... a[n-1][n-1]
//! ```
//!
//! where `n` is the order of the graph and each `a[i][j]` is `0` or `1`,
//! row-major. [`serialize`] produces this stream from any [`AdjacencySource`];
//! [`parse_adjacency_matrix`] reads it back into a [`Graph`].

pub mod error;
pub mod families;
pub mod graph;
pub mod serialize;

pub use error::GraphError;
pub use graph::{AdjacencySource, Graph};
pub use serialize::{parse_adjacency_matrix, serialize, serialize_checked};
