//! # gridcalc-core
//!
//! Core data structures for the gridcalc formula engine.
//!
//! This crate provides the fundamental types used throughout gridcalc:
//! - [`CellReference`] and [`CellRange`] - A1-style cell addressing
//! - [`CellValue`] - Raw cell contents as supplied by a host grid
//! - [`CellSource`] - The lookup interface the formula engine consumes
//! - [`Grid`] - A sparse in-memory grid that implements [`CellSource`]
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{parse_cell_reference, CellReference, CellValue, Grid};
//!
//! assert_eq!(parse_cell_reference("B12"), Some(CellReference::new(11, 1)));
//!
//! let mut grid = Grid::new();
//! grid.set_value("A1", 10.0).unwrap();
//! grid.set_value_at(1, 0, "20");
//! assert_eq!(grid.get_value_at(1, 0), CellValue::Text("20".into()));
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod source;

// Re-exports for convenience
pub use cell::{
    cell_reference_to_string, column_index_to_letters, format_number, letters_to_column_index,
    parse_cell_range, parse_cell_reference, parse_float_prefix, CellRange, CellRangeIterator,
    CellReference, CellValue,
};
pub use error::{Error, Result};
pub use grid::Grid;
pub use source::CellSource;
