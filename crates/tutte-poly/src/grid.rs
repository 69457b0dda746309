//! The coefficient grid and its parser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PolyError;

/// Ragged grid of Tutte coefficients: `rows[i][j]` is the coefficient of
/// `x^i y^j`.
///
/// Rows may be shorter than row 0; the engine leaves out trailing
/// high-degree cells, and an absent cell means a zero coefficient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoefficientGrid {
    rows: Vec<Vec<u64>>,
}

impl CoefficientGrid {
    pub fn new(rows: Vec<Vec<u64>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<u64>> {
        self.rows
    }

    /// Coefficient of `x^i y^j`, zero when the cell is absent.
    pub fn coefficient(&self, i: usize, j: usize) -> u64 {
        self.rows
            .get(i)
            .and_then(|row| row.get(j))
            .copied()
            .unwrap_or(0)
    }

    /// Number of rows, i.e. one more than the highest stored power of `x`.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Every stored cell as `(i, j, coefficient)` in row-major order,
    /// zeros included.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, &c)| (i, j, c)))
    }

    /// Cells with a non-zero coefficient, row-major.
    pub fn terms(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        self.cells().filter(|&(_, _, c)| c != 0)
    }

    /// Whether every coefficient is zero (including the empty grid).
    pub fn is_zero(&self) -> bool {
        self.terms().next().is_none()
    }

    /// JSON array-of-arrays form of the grid.
    pub fn to_json(&self) -> Result<String, PolyError> {
        serde_json::to_string(self).map_err(|e| PolyError::Serialization(e.to_string()))
    }
}

impl From<Vec<Vec<u64>>> for CoefficientGrid {
    fn from(rows: Vec<Vec<u64>>) -> Self {
        Self::new(rows)
    }
}

/// Writes the grid back in the engine's text format: one line per row,
/// values separated by single spaces.
impl fmt::Display for CoefficientGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let mut first = true;
            for value in row {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{value}")?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for CoefficientGrid {
    type Err = PolyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse raw engine output into a [`CoefficientGrid`].
///
/// Blank and whitespace-only lines are skipped; every other line becomes one
/// row. Any token that is not a plain run of decimal digits fitting in a
/// `u64` fails the whole parse.
pub fn parse(raw: &str) -> Result<CoefficientGrid, PolyError> {
    let mut rows = Vec::new();
    for (line_index, line) in raw.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row_index = rows.len();
        let row = line
            .split_whitespace()
            .enumerate()
            .map(|(column, token)| {
                parse_coefficient(token).ok_or_else(|| PolyError::MalformedOutput {
                    row: row_index,
                    column,
                    line: line_index + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<u64>, PolyError>>()?;
        rows.push(row);
    }

    tracing::debug!(
        rows = rows.len(),
        widest = rows.iter().map(Vec::len).max().unwrap_or(0),
        "parsed coefficient grid"
    );
    Ok(CoefficientGrid { rows })
}

fn parse_coefficient(token: &str) -> Option<u64> {
    // u64::from_str would also accept a leading '+'
    if token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ragged_rows() {
        let grid = parse("0 36 84\n36 168\n").unwrap();
        assert_eq!(grid, CoefficientGrid::new(vec![vec![0, 36, 84], vec![36, 168]]));
        assert_eq!(grid.coefficient(1, 1), 168);
        assert_eq!(grid.coefficient(1, 2), 0);
        assert_eq!(grid.coefficient(5, 0), 0);
    }

    #[test]
    fn skips_blank_lines() {
        let grid = parse("\n1 2\n   \n\t\n3\n\n").unwrap();
        assert_eq!(grid.into_rows(), vec![vec![1u64, 2], vec![3]]);
    }

    #[test]
    fn tolerates_crlf_and_extra_spaces() {
        let grid = parse("1  2 \r\n 3\r\n").unwrap();
        assert_eq!(grid.into_rows(), vec![vec![1u64, 2], vec![3]]);
    }

    #[test]
    fn empty_text_is_empty_grid() {
        let grid = parse("").unwrap();
        assert_eq!(grid.row_count(), 0);
        assert!(grid.is_zero());
    }

    #[test]
    fn non_numeric_token_reports_position() {
        let err = parse("1 x 2\n").unwrap_err();
        assert_eq!(
            err,
            PolyError::MalformedOutput {
                row: 0,
                column: 1,
                line: 1,
                token: "x".into()
            }
        );
    }

    #[test]
    fn row_index_ignores_blank_lines() {
        let err = parse("1\n\n2 3 -4\n").unwrap_err();
        assert_eq!(
            err,
            PolyError::MalformedOutput {
                row: 1,
                column: 2,
                line: 3,
                token: "-4".into()
            }
        );
    }

    #[test]
    fn rejects_signs_and_overflow() {
        assert!(parse("+5").is_err());
        assert!(parse("1.5").is_err());
        assert!(parse("18446744073709551616").is_err());
        assert_eq!(
            parse("18446744073709551615").unwrap().coefficient(0, 0),
            u64::MAX
        );
    }

    #[test]
    fn display_matches_engine_format() {
        let grid = CoefficientGrid::new(vec![vec![0, 1], vec![1]]);
        assert_eq!(grid.to_string(), "0 1\n1\n");
    }

    #[test]
    fn json_is_array_of_arrays() {
        let grid = CoefficientGrid::new(vec![vec![0, 1], vec![1]]);
        assert_eq!(grid.to_json().unwrap(), "[[0,1],[1]]");
    }

    #[test]
    fn json_reads_back_into_grid() {
        let grid: CoefficientGrid = serde_json::from_str("[[0, 36, 84], [36, 168]]").unwrap();
        assert_eq!(grid, parse("0 36 84\n36 168\n").unwrap());
        assert!(serde_json::from_str::<CoefficientGrid>("[[1, -2]]").is_err());
        assert!(serde_json::from_str::<CoefficientGrid>("{\"rows\": []}").is_err());
    }

    #[test]
    fn terms_skip_zeros_row_major() {
        let grid = CoefficientGrid::new(vec![vec![0, 2], vec![3, 0, 4]]);
        assert_eq!(
            grid.terms().collect::<Vec<_>>(),
            vec![(0, 1, 2), (1, 0, 3), (1, 2, 4)]
        );
        assert_eq!(grid.cells().count(), 5);
    }
}
