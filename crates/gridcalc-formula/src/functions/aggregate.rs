//! SUM, AVERAGE, COUNT, MAX and MIN over a block of cells

use gridcalc_core::{CellReference, CellSource};

/// Look up and coerce every cell, dropping values that are still NaN
///
/// Only a cell that already holds a NaN number can be dropped; text always
/// coerces to a real number.
fn collect_values(cells: &[CellReference], source: &dyn CellSource) -> Vec<f64> {
    cells
        .iter()
        .map(|cell| source.cell_value(cell.row, cell.col).coerce_number())
        .filter(|v| !v.is_nan())
        .collect()
}

/// SUM function
pub fn fn_sum(cells: &[CellReference], source: &dyn CellSource) -> f64 {
    collect_values(cells, source).iter().sum()
}

/// AVERAGE function; 0 when nothing was collected
pub fn fn_average(cells: &[CellReference], source: &dyn CellSource) -> f64 {
    let values = collect_values(cells, source);
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// COUNT function
///
/// Counts addressed cells, populated or not, and never reads them.
pub fn fn_count(cells: &[CellReference], _source: &dyn CellSource) -> f64 {
    cells.len() as f64
}

/// MAX function; 0 when nothing was collected
pub fn fn_max(cells: &[CellReference], source: &dyn CellSource) -> f64 {
    collect_values(cells, source)
        .into_iter()
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// MIN function; 0 when nothing was collected
pub fn fn_min(cells: &[CellReference], source: &dyn CellSource) -> f64 {
    collect_values(cells, source)
        .into_iter()
        .reduce(f64::min)
        .unwrap_or(0.0)
}
