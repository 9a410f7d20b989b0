//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Calculation types
    CalculatedGrid,
    CalculationOptions,
    CalculationStats,
    // Cell types
    CellRange,
    CellReference,
    CellSource,
    CellValue,
    // Formula types
    EvaluationOptions,
    FormulaOutput,
    Grid,
    // Extension traits
    GridCalculationExt,
    // Functions
    evaluate_formula,
    is_formula,
};

#[cfg(feature = "csv")]
pub use crate::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
