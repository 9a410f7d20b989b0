//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Reasons a formula fails to evaluate
///
/// These never cross [`crate::evaluate_formula`], which collapses all of them
/// into the `"#ERROR"` sentinel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Character sequence that is not part of the formula grammar
    #[error("Tokenize error: {0}")]
    Tokenize(String),

    /// Tokens that do not form a valid arithmetic expression
    #[error("Parse error: {0}")]
    Parse(String),

    /// Non-function formula without a single cell reference
    #[error("Formula contains no cell references")]
    NoReferences,

    /// Arithmetic produced something other than a number
    #[error("Invalid result: {0}")]
    InvalidResult(String),

    /// Range argument larger than the configured limit
    #[error("Range of {cells} cells exceeds the limit of {limit}")]
    RangeTooLarge { cells: u64, limit: u64 },
}
