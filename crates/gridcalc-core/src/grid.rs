//! Sparse in-memory grid

use std::collections::BTreeMap;

use crate::cell::{CellRange, CellReference, CellValue};
use crate::error::{Error, Result};
use crate::source::CellSource;

/// A sparse grid of raw cell contents
///
/// Only non-empty cells are stored. Iteration is row-major because
/// [`CellReference`] orders by row, then column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    cells: BTreeMap<CellReference, CellValue>,
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    // === Cell Access ===

    /// Get cell value by address string (e.g., "A1")
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let cell: CellReference = address.trim().parse()?;
        Ok(self.get_value_at(cell.row, cell.col))
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u32) -> CellValue {
        self.cells
            .get(&CellReference::new(row, col))
            .cloned()
            .unwrap_or(CellValue::Empty)
    }

    /// Set a cell value by address string
    pub fn set_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let cell = CellReference::parse(address.trim())
            .ok_or_else(|| Error::InvalidAddress(format!("'{}'", address)))?;
        self.set_value_at(cell.row, cell.col, value);
        Ok(())
    }

    /// Set a cell value by indices; setting `Empty` clears the cell
    pub fn set_value_at<V: Into<CellValue>>(&mut self, row: u32, col: u32, value: V) {
        let key = CellReference::new(row, col);
        match value.into() {
            CellValue::Empty => {
                self.cells.remove(&key);
            }
            value => {
                self.cells.insert(key, value);
            }
        }
    }

    /// Number of non-empty cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid holds no values
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // === Iteration ===

    /// Iterate over non-empty cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (CellReference, &CellValue)> {
        self.cells.iter().map(|(cell, value)| (*cell, value))
    }

    /// Iterate over text cells accepted by `is_formula`
    pub fn formula_cells<'a, F>(
        &'a self,
        is_formula: F,
    ) -> impl Iterator<Item = (CellReference, &'a str)> + 'a
    where
        F: Fn(&str) -> bool + 'a,
    {
        self.cells.iter().filter_map(move |(cell, value)| match value {
            CellValue::Text(text) if is_formula(text) => Some((*cell, text.as_str())),
            _ => None,
        })
    }

    /// Get the used range (bounds of all non-empty cells)
    pub fn used_range(&self) -> Option<CellRange> {
        let first = self.cells.keys().next()?;
        let (mut min_row, mut min_col) = (first.row, first.col);
        let (mut max_row, mut max_col) = (first.row, first.col);

        for cell in self.cells.keys() {
            min_row = min_row.min(cell.row);
            max_row = max_row.max(cell.row);
            min_col = min_col.min(cell.col);
            max_col = max_col.max(cell.col);
        }

        Some(CellRange::new(
            CellReference::new(min_row, min_col),
            CellReference::new(max_row, max_col),
        ))
    }
}

impl CellSource for Grid {
    fn cell_value(&self, row: u32, col: u32) -> CellValue {
        self.get_value_at(row, col)
    }
}
