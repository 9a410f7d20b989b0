//! # gridcalc-formula
//!
//! Formula detection and evaluation for gridcalc.
//!
//! This crate provides:
//! - Formula detection ([`is_formula`])
//! - The five aggregate functions (SUM, AVERAGE, COUNT, MAX, MIN)
//! - Arithmetic over cell references (`+ - * /` and parentheses) through
//!   a tokenizer and recursive descent parser, with no dynamic code evaluation
//! - Reference extraction and a dependency graph for sheet-level calculation
//!
//! Every failure surfaces from [`evaluate_formula`] as the `"#ERROR"` sentinel.
//! [`try_evaluate_formula`] exposes the typed [`FormulaError`] instead.
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::CellValue;
//! use gridcalc_formula::{evaluate_formula, FormulaOutput};
//!
//! let cells = |row: u32, col: u32| match (row, col) {
//!     (0, 0) => CellValue::Number(5.0),
//!     (0, 1) => CellValue::text("3"),
//!     _ => CellValue::Empty,
//! };
//!
//! assert_eq!(evaluate_formula("=A1+B1*2", &cells), FormulaOutput::Number(11.0));
//! assert_eq!(evaluate_formula("=SUM(A1:B1)", &cells), FormulaOutput::Number(8.0));
//! assert!(evaluate_formula("=XYZ(((", &cells).is_error());
//! assert_eq!(evaluate_formula("hello", &cells), FormulaOutput::Text("hello".into()));
//! ```

pub mod ast;
pub mod dependency;
pub mod detect;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod references;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use dependency::DependencyGraph;
pub use detect::is_formula;
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{
    evaluate_formula, evaluate_formula_with_options, try_evaluate_formula, Evaluation,
    FormulaOutput, ERROR_SENTINEL,
};
pub use options::EvaluationOptions;
pub use parser::parse_expression;
pub use references::{formula_references, read_ranges, FormulaReference};
