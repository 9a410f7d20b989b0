//! # gridcalc
//!
//! A small spreadsheet formula engine.
//!
//! Given the raw text of a cell and a way to look up other cells, gridcalc
//! decides whether the text is a formula and, if so, computes it. Formulas
//! are either one aggregate call over an A1 range (`=SUM(A1:A10)`) or
//! arithmetic over cell references (`=A1+B2*2`). Every failure evaluates to
//! the `"#ERROR"` sentinel.
//!
//! ## Features
//!
//! - A1 reference parsing and formatting with bijective base-26 columns
//! - `SUM`, `AVERAGE`, `COUNT`, `MAX` and `MIN` over ranges
//! - Cell arithmetic with `+ - * /`, unary signs and parentheses
//! - Grid-wide calculation in dependency order with cycle detection
//! - CSV import and export (feature `csv`, on by default)
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut grid = Grid::new();
//! grid.set_value("A1", 5.0).unwrap();
//! grid.set_value("B1", "3").unwrap();
//!
//! assert_eq!(evaluate_formula("=A1+B1*2", &grid), FormulaOutput::Number(11.0));
//! assert_eq!(evaluate_formula("=SUM(A1:B1)", &grid), FormulaOutput::Number(8.0));
//! assert!(evaluate_formula("=XYZ(((", &grid).is_error());
//! assert_eq!(evaluate_formula("hello", &grid), FormulaOutput::Text("hello".into()));
//! ```

pub mod calculation;
pub mod prelude;

// Re-export calculation types
pub use calculation::{
    calculate, CalculatedGrid, CalculationOptions, CalculationStats, GridCalculationExt,
};

// Re-export core types
pub use gridcalc_core::{
    // Addressing
    cell_reference_to_string,
    column_index_to_letters,
    letters_to_column_index,
    parse_cell_range,
    parse_cell_reference,
    CellRange,
    CellReference,
    // Cell values
    format_number,
    parse_float_prefix,
    CellSource,
    CellValue,
    // Error types
    Error,
    Grid,
    Result,
};

// Re-export formula types
pub use gridcalc_formula::{
    evaluate_formula, evaluate_formula_with_options, formula_references, is_formula,
    read_ranges, try_evaluate_formula, DependencyGraph, Evaluation, EvaluationOptions,
    FormulaError, FormulaOutput, FormulaReference, FormulaResult, ERROR_SENTINEL,
};

// Re-export I/O types
#[cfg(feature = "csv")]
pub use gridcalc_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvResult, CsvWriteOptions, CsvWriter, LineTerminator,
};
