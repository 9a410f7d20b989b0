//! Formula evaluator
//!
//! Entry points that turn formula text into a [`FormulaOutput`], plus the
//! arithmetic evaluator for parsed [`Expr`] trees.

use crate::ast::{Expr, UnaryOperator};
use crate::detect::is_formula;
use crate::error::{FormulaError, FormulaResult};
use crate::functions::match_function_call;
use crate::lexer::{tokenize, Token};
use crate::options::EvaluationOptions;
use crate::parser::parse_tokens;
use gridcalc_core::{format_number, CellSource, CellValue};
use std::fmt;

/// The single failure value returned by [`evaluate_formula`]
pub const ERROR_SENTINEL: &str = "#ERROR";

/// What a host displays for a cell: a number or a string
///
/// Strings are either non-formula text passed through unchanged or the
/// [`ERROR_SENTINEL`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaOutput {
    Number(f64),
    Text(String),
}

impl FormulaOutput {
    /// The `"#ERROR"` sentinel
    pub fn error() -> Self {
        FormulaOutput::Text(ERROR_SENTINEL.to_string())
    }

    /// Check if this is the error sentinel
    pub fn is_error(&self) -> bool {
        matches!(self, FormulaOutput::Text(s) if s == ERROR_SENTINEL)
    }
}

impl fmt::Display for FormulaOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaOutput::Number(n) => f.write_str(&format_number(*n)),
            FormulaOutput::Text(s) => f.write_str(s),
        }
    }
}

impl From<FormulaOutput> for CellValue {
    fn from(output: FormulaOutput) -> Self {
        match output {
            FormulaOutput::Number(n) => CellValue::Number(n),
            FormulaOutput::Text(s) => CellValue::Text(s),
        }
    }
}

/// Successful outcome of [`try_evaluate_formula`]
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// The input was not a formula and is returned as is
    PassThrough(String),
    /// The formula evaluated to a number
    Number(f64),
}

impl From<Evaluation> for FormulaOutput {
    fn from(evaluation: Evaluation) -> Self {
        match evaluation {
            Evaluation::PassThrough(text) => FormulaOutput::Text(text),
            Evaluation::Number(n) => FormulaOutput::Number(n),
        }
    }
}

/// Evaluate a formula with default options
///
/// Never fails: every error becomes the `"#ERROR"` sentinel.
pub fn evaluate_formula(formula: &str, source: &dyn CellSource) -> FormulaOutput {
    evaluate_formula_with_options(formula, source, &EvaluationOptions::default())
}

/// Evaluate a formula with custom options
pub fn evaluate_formula_with_options(
    formula: &str,
    source: &dyn CellSource,
    options: &EvaluationOptions,
) -> FormulaOutput {
    match try_evaluate_formula(formula, source, options) {
        Ok(evaluation) => evaluation.into(),
        Err(err) => {
            log::debug!("formula {:?} evaluated to {}: {}", formula, ERROR_SENTINEL, err);
            FormulaOutput::error()
        }
    }
}

/// Evaluate a formula, reporting failures as a typed [`FormulaError`]
///
/// Text that [`is_formula`] rejects is passed through. Otherwise the trimmed
/// text minus one leading `=` is matched against the built-in functions,
/// and failing that evaluated as arithmetic over cell references.
pub fn try_evaluate_formula(
    formula: &str,
    source: &dyn CellSource,
    options: &EvaluationOptions,
) -> FormulaResult<Evaluation> {
    if !is_formula(formula) {
        return Ok(Evaluation::PassThrough(formula.to_string()));
    }

    let body = formula_body(formula);

    if let Some(call) = match_function_call(body) {
        return call.evaluate(source, options).map(Evaluation::Number);
    }

    evaluate_arithmetic(body, source).map(Evaluation::Number)
}

/// Strip surrounding whitespace and one leading `=`
pub(crate) fn formula_body(formula: &str) -> &str {
    let trimmed = formula.trim();
    trimmed.strip_prefix('=').unwrap_or(trimmed).trim()
}

/// Evaluate an arithmetic formula body such as `A1+B1*2`
///
/// The body must mention at least one cell or range, and the result must
/// not be NaN. Division by zero yields an infinity, which is a valid result.
pub fn evaluate_arithmetic(body: &str, source: &dyn CellSource) -> FormulaResult<f64> {
    let tokens = tokenize(body)?;
    if !tokens.iter().any(Token::is_reference) {
        return Err(FormulaError::NoReferences);
    }

    let expr = parse_tokens(&tokens)?;
    let value = evaluate(&expr, source);
    if value.is_nan() {
        return Err(FormulaError::InvalidResult("NaN".into()));
    }
    Ok(value)
}

/// Evaluate an expression tree
///
/// Each reference node does its own lookup, so `A1+A1` reads `A1` twice.
pub fn evaluate(expr: &Expr, source: &dyn CellSource) -> f64 {
    match expr {
        Expr::Number(n) => *n,
        Expr::CellRef(cell) => source.cell_value(cell.row, cell.col).coerce_number(),
        Expr::Binary { op, left, right } => {
            let left = evaluate(left, source);
            let right = evaluate(right, source);
            op.apply(left, right)
        }
        Expr::Unary { op, operand } => {
            let value = evaluate(operand, source);
            match op {
                UnaryOperator::Negate => -value,
                UnaryOperator::Plus => value,
            }
        }
    }
}
