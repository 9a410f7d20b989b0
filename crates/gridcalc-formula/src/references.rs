//! Reference extraction
//!
//! Lists the cells and ranges a formula reads, for dependency tracking and
//! for display.

use crate::evaluator::formula_body;
use crate::functions::{match_function_call, resolve_argument};
use crate::lexer::{Lexer, Token};
use gridcalc_core::{CellRange, CellRangeIterator, CellReference};
use std::fmt;

/// A cell or range mentioned in a formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaReference {
    Cell(CellReference),
    Range(CellRange),
}

impl FormulaReference {
    /// Every cell this reference covers, row-major
    ///
    /// An inverted range covers nothing.
    pub fn cells(&self) -> CellRangeIterator {
        match self {
            FormulaReference::Cell(cell) => CellRange::single(*cell).cells(),
            FormulaReference::Range(range) => range.cells(),
        }
    }

    /// Number of cells covered
    pub fn cell_count(&self) -> u64 {
        match self {
            FormulaReference::Cell(_) => 1,
            FormulaReference::Range(range) => range.cell_count(),
        }
    }
}

impl fmt::Display for FormulaReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaReference::Cell(cell) => write!(f, "{}", cell),
            FormulaReference::Range(range) => write!(f, "{}", range),
        }
    }
}

/// Extract references from formula text, in textual order
///
/// A leading `=` is ignored and duplicates are kept. Extraction stops at the
/// first character the tokenizer rejects, so a malformed tail contributes
/// nothing.
///
/// ```
/// use gridcalc_formula::formula_references;
///
/// let refs: Vec<String> = formula_references("=SUM(A1:B2)+C3")
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(refs, ["A1:B2", "C3"]);
/// ```
pub fn formula_references(formula: &str) -> Vec<FormulaReference> {
    Lexer::new(formula_body(formula))
        .map_while(Result::ok)
        .filter_map(|token| match token {
            Token::CellRef(cell) => Some(FormulaReference::Cell(cell)),
            Token::Range(range) => Some(FormulaReference::Range(range)),
            _ => None,
        })
        .collect()
}

/// The blocks of cells that evaluating a formula reads
///
/// Unlike [`formula_references`], a function call contributes only its
/// resolved argument, including the `A1` fallback, and ignores any text
/// after the closing parenthesis.
pub fn read_ranges(formula: &str) -> Vec<CellRange> {
    let body = formula_body(formula);
    if let Some(call) = match_function_call(body) {
        return vec![resolve_argument(call.argument)];
    }

    formula_references(body)
        .into_iter()
        .map(|reference| match reference {
            FormulaReference::Cell(cell) => CellRange::single(cell),
            FormulaReference::Range(range) => range,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cell(a1: &str) -> CellReference {
        CellReference::parse(a1).unwrap()
    }

    #[test]
    fn test_arithmetic_references() {
        assert_eq!(
            formula_references("=AA1+A1*A1"),
            vec![
                FormulaReference::Cell(cell("AA1")),
                FormulaReference::Cell(cell("A1")),
                FormulaReference::Cell(cell("A1")),
            ]
        );
    }

    #[test]
    fn test_range_references() {
        assert_eq!(
            formula_references("average(B2:A1)"),
            vec![FormulaReference::Range(CellRange::new(cell("B2"), cell("A1")))]
        );
        assert_eq!(formula_references("=COUNT(B2:A1)")[0].cell_count(), 0);
    }

    #[test]
    fn test_stops_at_tokenize_error() {
        assert_eq!(
            formula_references("=A1 + B2 & C3"),
            vec![
                FormulaReference::Cell(cell("A1")),
                FormulaReference::Cell(cell("B2")),
            ]
        );
    }

    #[test]
    fn test_no_references() {
        assert!(formula_references("=1+2").is_empty());
        assert!(formula_references("hello world").is_empty());
        assert!(formula_references("").is_empty());
    }

    #[test]
    fn test_cells() {
        let cells: Vec<String> = FormulaReference::Range(CellRange::new(cell("A1"), cell("B2")))
            .cells()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(cells, vec!["A1", "B1", "A2", "B2"]);

        let single: Vec<CellReference> = FormulaReference::Cell(cell("C3")).cells().collect();
        assert_eq!(single, vec![cell("C3")]);
    }

    #[test]
    fn test_read_ranges() {
        let ranges: Vec<String> = read_ranges("=SUM(A1:A3)+B9")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ranges, vec!["A1:A3"]);

        let ranges: Vec<String> = read_ranges("=MAX(junk)")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ranges, vec!["A1:A1"]);

        let ranges: Vec<String> = read_ranges("=SUM()+SUM(B2:B4)")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ranges, vec!["B2:B4"]);

        let ranges: Vec<String> = read_ranges("=B1*C2-B1")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ranges, vec!["B1:B1", "C2:C2", "B1:B1"]);
    }
}
