//! Property tests for grid parsing and rendering.

use proptest::prelude::*;
use tutte_poly::{parse, render, CoefficientGrid, OutputFormat, Rendered};

/// Ragged grids with at least one cell per row, as the engine prints them.
fn grid_strategy() -> impl Strategy<Value = CoefficientGrid> {
    proptest::collection::vec(proptest::collection::vec(0u64..500, 1..8), 0..10)
        .prop_map(CoefficientGrid::new)
}

proptest! {
    #[test]
    fn raw_grid_text_parses_back(grid in grid_strategy()) {
        let text = render(&grid, OutputFormat::RawGrid).to_string();
        prop_assert_eq!(parse(&text).unwrap(), grid);
    }

    #[test]
    fn trailing_blank_lines_do_not_change_the_grid(grid in grid_strategy(), blanks in 0usize..4) {
        let text = format!("{grid}{}", "\n".repeat(blanks));
        prop_assert_eq!(parse(&text).unwrap(), grid);
    }

    #[test]
    fn one_symbolic_term_per_nonzero_cell(grid in grid_strategy()) {
        let expr = grid.to_symbolic();
        let nonzero = grid.terms().count();
        let terms = if expr.is_empty() { 0 } else { expr.split(" + ").count() };
        prop_assert_eq!(terms, nonzero);
    }

    #[test]
    fn rendering_twice_is_identical(grid in grid_strategy()) {
        for format in OutputFormat::ALL {
            prop_assert_eq!(render(&grid, format), render(&grid, format));
        }
    }
}

#[test]
fn petersen_grid_renders() {
    let raw = "0 36 84 75 35 9 1\n36 168 171 65 10\n120 240 105 15\n180 170 30\n170 70\n114 12\n56\n21\n6\n1\n";
    let grid = parse(raw).unwrap();
    assert_eq!(grid.row_count(), 10);

    let Rendered::Expression(sym) = render(&grid, OutputFormat::Symbolic) else {
        panic!("symbolic render must produce an expression");
    };
    assert!(sym.starts_with("36*y + 84*y**2 + 75*y**3"));
    assert!(sym.ends_with("21*x**7 + 6*x**8 + 1*x**9"));

    let latex = grid.to_latex();
    assert!(latex.starts_with("36y + 84y^2"));
    assert!(latex.contains("168x y"));
    assert!(latex.ends_with("6x^8 + x^9"));
}
