//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellReference`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A rectangular block of cells (e.g., "A1:B10")
//! - [`CellValue`] - The raw value a host stores in a cell

mod address;
mod value;

pub use address::{
    cell_reference_to_string, column_index_to_letters, letters_to_column_index, parse_cell_range,
    parse_cell_reference, CellRange, CellRangeIterator, CellReference,
};
pub use value::{format_number, parse_float_prefix, CellValue};
