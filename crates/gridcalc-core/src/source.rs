//! The cell lookup interface consumed by the formula engine

use crate::cell::CellValue;

/// Something that can answer "what is in cell (row, col)?"
///
/// This is the only thing the formula engine needs from a host grid. Lookups
/// are synchronous and are not cached by the engine; a host with expensive
/// lookups should memoise on its side.
///
/// Any `Fn(u32, u32) -> CellValue` closure is a `CellSource`:
///
/// ```
/// use gridcalc_core::{CellSource, CellValue};
///
/// let source = |row: u32, col: u32| CellValue::from(f64::from(row * 10 + col));
/// assert_eq!(source.cell_value(2, 3), CellValue::Number(23.0));
/// ```
pub trait CellSource {
    /// Look up the raw value at a zero-based row and column
    fn cell_value(&self, row: u32, col: u32) -> CellValue;
}

impl<F> CellSource for F
where
    F: Fn(u32, u32) -> CellValue,
{
    fn cell_value(&self, row: u32, col: u32) -> CellValue {
        self(row, col)
    }
}
