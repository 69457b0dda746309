//! Decoding and presentation of Tutte polynomial coefficient grids.
//!
//! The external engine prints one line per power of `x`; the `j`-th integer on
//! line `i` is the coefficient of `x^i y^j`. [`parse`] turns that text into a
//! [`CoefficientGrid`], and [`render`] presents the grid as the grid itself,
//! a sympy-compatible expression, or LaTeX.

pub mod error;
pub mod grid;
pub mod render;

pub use error::PolyError;
pub use grid::{parse, CoefficientGrid};
pub use render::{render, OutputFormat, Rendered};
