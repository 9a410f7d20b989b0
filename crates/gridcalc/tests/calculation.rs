//! Tests for grid-wide calculation

use gridcalc::prelude::*;
use gridcalc::CalculationStats;
use pretty_assertions::assert_eq;

#[test]
fn test_budget_sheet() {
    let mut grid = Grid::new();
    grid.set_value("A1", "Item").unwrap();
    grid.set_value("B1", "Cost").unwrap();
    grid.set_value("A2", "rent").unwrap();
    grid.set_value("B2", 1200.0).unwrap();
    grid.set_value("A3", "food").unwrap();
    grid.set_value("B3", "450").unwrap();
    grid.set_value("A4", "total").unwrap();
    grid.set_value("B4", "=SUM(B2:B3)").unwrap();
    grid.set_value("B5", "=B4/2").unwrap();
    grid.set_value("B6", "=MAX(B2:B5)").unwrap();

    let calculated = grid.calculate();

    assert_eq!(calculated.values.get_value("B4").unwrap(), CellValue::Number(1650.0));
    assert_eq!(calculated.values.get_value("B5").unwrap(), CellValue::Number(825.0));
    assert_eq!(calculated.values.get_value("B6").unwrap(), CellValue::Number(1650.0));
    assert_eq!(calculated.values.get_value("A4").unwrap(), CellValue::text("total"));
    assert_eq!(
        calculated.stats,
        CalculationStats {
            formula_count: 3,
            cells_calculated: 3,
            circular_references: 0,
            errors: 0,
        }
    );
}

#[test]
fn test_cycle_does_not_poison_independent_cells() {
    let mut grid = Grid::new();
    grid.set_value("A1", "=A2").unwrap();
    grid.set_value("A2", "=A1").unwrap();
    grid.set_value("B1", 3.0).unwrap();
    grid.set_value("B2", "=B1*B1").unwrap();

    let calculated = grid.calculate();

    assert_eq!(calculated.values.get_value_at(0, 0), CellValue::text("#ERROR"));
    assert_eq!(calculated.values.get_value_at(1, 0), CellValue::text("#ERROR"));
    assert_eq!(calculated.values.get_value_at(1, 1), CellValue::Number(9.0));
    assert_eq!(calculated.stats.circular_references, 2);
}
