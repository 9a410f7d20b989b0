//! Grid calculation engine
//!
//! Evaluates every formula cell of a [`Grid`] in dependency order, so a
//! formula that reads another formula sees its computed value rather than
//! its source text. Cells on or downstream of a circular reference become
//! `"#ERROR"`.
//!
//! # Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut grid = Grid::new();
//! grid.set_value("A1", 10.0).unwrap();
//! grid.set_value("A2", 20.0).unwrap();
//! grid.set_value("A3", "=A1+A2").unwrap();
//! grid.set_value("A4", "=A3*2").unwrap();
//!
//! let calculated = grid.calculate();
//! assert_eq!(calculated.values.get_value_at(3, 0), CellValue::Number(60.0));
//! assert_eq!(calculated.stats.cells_calculated, 2);
//! ```

use crate::{
    evaluate_formula_with_options, is_formula, read_ranges, CellReference, CellValue,
    DependencyGraph, EvaluationOptions, FormulaOutput, Grid,
};
use std::collections::{BTreeMap, HashSet};

/// Options for grid calculation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalculationOptions {
    /// Options passed to every formula evaluation
    pub evaluation: EvaluationOptions,
}

/// Statistics from a calculation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Total number of formula cells
    pub formula_count: usize,
    /// Number of cells calculated
    pub cells_calculated: usize,
    /// Number of cells on or behind a circular reference
    pub circular_references: usize,
    /// Number of formula cells that ended up as `"#ERROR"`
    pub errors: usize,
}

/// The displayed values of a grid after calculation
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatedGrid {
    /// Non-formula cells unchanged, formula cells replaced by their output
    pub values: Grid,
    /// What the calculation run did
    pub stats: CalculationStats,
}

/// Calculate all formulas in a grid
pub fn calculate(grid: &Grid, options: &CalculationOptions) -> CalculatedGrid {
    CalculationEngine::new(grid, options).calculate_all()
}

/// Extension trait for Grid to add calculation methods
pub trait GridCalculationExt {
    /// Calculate all formulas with default options
    fn calculate(&self) -> CalculatedGrid;

    /// Calculate all formulas with custom options
    fn calculate_with_options(&self, options: &CalculationOptions) -> CalculatedGrid;
}

impl GridCalculationExt for Grid {
    fn calculate(&self) -> CalculatedGrid {
        calculate(self, &CalculationOptions::default())
    }

    fn calculate_with_options(&self, options: &CalculationOptions) -> CalculatedGrid {
        calculate(self, options)
    }
}

/// The calculation engine
struct CalculationEngine<'a> {
    grid: &'a Grid,
    options: &'a CalculationOptions,
    /// Dependency graph between formula cells
    dependency_graph: DependencyGraph,
    /// Formula source text, keyed by cell
    formulas: BTreeMap<CellReference, &'a str>,
    /// Cells involved in circular references
    circular_cells: HashSet<CellReference>,
}

impl<'a> CalculationEngine<'a> {
    fn new(grid: &'a Grid, options: &'a CalculationOptions) -> Self {
        Self {
            grid,
            options,
            dependency_graph: DependencyGraph::new(),
            formulas: grid.formula_cells(is_formula).collect(),
            circular_cells: HashSet::new(),
        }
    }

    fn calculate_all(mut self) -> CalculatedGrid {
        let mut stats = CalculationStats {
            formula_count: self.formulas.len(),
            ..Default::default()
        };
        let mut values = self.grid.clone();

        if self.formulas.is_empty() {
            return CalculatedGrid { values, stats };
        }

        // Phase 1: Build the dependency graph
        self.build_dependency_graph();

        // Phase 2: Detect circular references
        self.detect_circular_references();
        stats.circular_references = self.circular_cells.len();

        // Phase 3: Calculate cells in dependency order
        for cell in self.calculation_order() {
            let Some(&formula) = self.formulas.get(&cell) else {
                continue;
            };

            let output = if self.circular_cells.contains(&cell) {
                log::warn!("circular reference at {}: {}", cell, formula);
                FormulaOutput::error()
            } else {
                stats.cells_calculated += 1;
                evaluate_formula_with_options(formula, &values, &self.options.evaluation)
            };

            if output.is_error() {
                stats.errors += 1;
            }
            values.set_value_at(cell.row, cell.col, CellValue::from(output));
        }

        CalculatedGrid { values, stats }
    }

    /// Link each formula to the formula cells it reads
    ///
    /// Only formula precedents matter for ordering, so each range is matched
    /// against the formula cells in its row span instead of being expanded.
    fn build_dependency_graph(&mut self) {
        for (&cell, &formula) in &self.formulas {
            for range in read_ranges(formula) {
                if range.is_empty() {
                    continue;
                }

                let first = CellReference::new(range.start.row, 0);
                let last = CellReference::new(range.end.row, u32::MAX);
                for (&precedent, _) in self.formulas.range(first..=last) {
                    if range.contains(&precedent) {
                        self.dependency_graph.add_dependency(precedent, cell);
                    }
                }
            }
        }
    }

    fn detect_circular_references(&mut self) {
        self.circular_cells = self.dependency_graph.circular_cells();
    }

    fn calculation_order(&self) -> Vec<CellReference> {
        self.dependency_graph
            .calculation_order(self.formulas.keys().copied())
    }
}
