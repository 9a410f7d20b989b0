//! # gridcalc-csv
//!
//! CSV reader and writer for gridcalc grids.
//!
//! Fields that parse as numbers are read as [`CellValue::Number`], empty
//! fields are left empty, and everything else (formula text included) is
//! read as [`CellValue::Text`].
//!
//! [`CellValue::Number`]: gridcalc_core::CellValue::Number
//! [`CellValue::Text`]: gridcalc_core::CellValue::Text

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
