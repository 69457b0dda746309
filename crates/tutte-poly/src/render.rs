//! Presentation of a coefficient grid.
//!
//! One renderer serves every output format. Two quirks of the established
//! output are kept on purpose:
//!
//! - the symbolic constant term is written `c*1` rather than `c`;
//! - the LaTeX form drops every term whose coefficient is exactly 2.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PolyError;
use crate::grid::CoefficientGrid;

/// Requested presentation of a Tutte polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// The coefficient grid itself, zeros and all.
    RawGrid,
    /// Sum of monomials with `*` and `**`, readable by sympy.
    #[default]
    Symbolic,
    /// LaTeX expression with `^` exponents.
    Latex,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::RawGrid,
        OutputFormat::Symbolic,
        OutputFormat::Latex,
    ];

    /// Canonical name, accepted back by `from_str`.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::RawGrid => "raw",
            OutputFormat::Symbolic => "symbolic",
            OutputFormat::Latex => "latex",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = PolyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "grid" | "lol" => Ok(OutputFormat::RawGrid),
            "symbolic" | "sp" | "sympy" => Ok(OutputFormat::Symbolic),
            "latex" | "tex" => Ok(OutputFormat::Latex),
            _ => Err(PolyError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    Grid(CoefficientGrid),
    Expression(String),
}

impl Rendered {
    pub fn as_grid(&self) -> Option<&CoefficientGrid> {
        match self {
            Rendered::Grid(grid) => Some(grid),
            Rendered::Expression(_) => None,
        }
    }

    pub fn as_expression(&self) -> Option<&str> {
        match self {
            Rendered::Grid(_) => None,
            Rendered::Expression(expr) => Some(expr),
        }
    }
}

/// The grid prints in engine text format, an expression prints verbatim.
impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Grid(grid) => write!(f, "{grid}"),
            Rendered::Expression(expr) => f.write_str(expr),
        }
    }
}

/// Render `grid` in the requested format.
pub fn render(grid: &CoefficientGrid, format: OutputFormat) -> Rendered {
    match format {
        OutputFormat::RawGrid => Rendered::Grid(grid.clone()),
        OutputFormat::Symbolic => Rendered::Expression(grid.to_symbolic()),
        OutputFormat::Latex => Rendered::Expression(grid.to_latex()),
    }
}

impl CoefficientGrid {
    /// Sympy-compatible sum of monomials, e.g. `36*x + 168*x*y + 1*y**6`.
    ///
    /// Empty string when every coefficient is zero.
    pub fn to_symbolic(&self) -> String {
        let terms: Vec<String> = self.terms().map(|(i, j, c)| symbolic_term(i, j, c)).collect();
        terms.join(" + ")
    }

    /// LaTeX sum of monomials, e.g. `36x + 168x y + y^6`.
    ///
    /// Coefficients of 1 are implicit. Terms with coefficient 2 are omitted.
    pub fn to_latex(&self) -> String {
        let terms: Vec<String> = self
            .terms()
            .filter_map(|(i, j, c)| latex_term(i, j, c))
            .collect();
        terms.join(" + ")
    }
}

fn symbolic_power(var: char, degree: usize) -> Option<String> {
    match degree {
        0 => None,
        1 => Some(var.to_string()),
        d => Some(format!("{var}**{d}")),
    }
}

fn symbolic_term(i: usize, j: usize, coefficient: u64) -> String {
    let factors: Vec<String> = [symbolic_power('x', i), symbolic_power('y', j)]
        .into_iter()
        .flatten()
        .collect();
    if factors.is_empty() {
        format!("{coefficient}*1")
    } else {
        format!("{coefficient}*{}", factors.join("*"))
    }
}

fn latex_power(var: char, degree: usize) -> Option<String> {
    match degree {
        0 => None,
        1 => Some(var.to_string()),
        d @ 2..=9 => Some(format!("{var}^{d}")),
        d => Some(format!("{var}^{{{d}}}")),
    }
}

fn latex_term(i: usize, j: usize, coefficient: u64) -> Option<String> {
    let monomial = [latex_power('x', i), latex_power('y', j)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    match coefficient {
        0 | 2 => None,
        1 if monomial.is_empty() => Some("1".to_string()),
        1 => Some(monomial),
        c => Some(format!("{c}{monomial}")),
    }
}
