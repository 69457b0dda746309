//! Grid parsing and rendering errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolyError {
    /// A token in the engine output is not a non-negative integer.
    #[error("malformed engine output at line {line} (row {row}, token {column}): '{token}' is not a non-negative integer")]
    MalformedOutput {
        /// Index among retained (non-blank) lines, i.e. the power of `x`.
        row: usize,
        /// Token index within the line, i.e. the power of `y`.
        column: usize,
        /// 1-based physical line number in the raw text.
        line: usize,
        token: String,
    },

    #[error("unsupported output format '{0}': choose raw, symbolic or latex")]
    UnsupportedFormat(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
