//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use gridcalc_core::{CellValue, Error, Grid};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a grid
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Grid> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a grid
    ///
    /// The first record lands in row 1 (`A1`), after the header if any.
    /// Records may have different lengths.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Grid> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .flexible(true)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let mut grid = Grid::new();

        for (row_idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = u32::try_from(row_idx)
                .map_err(|_| Error::InvalidAddress(format!("record {}", row_idx + 1)))?;

            for (col_idx, field) in record.iter().enumerate() {
                let col = u32::try_from(col_idx)
                    .map_err(|_| Error::InvalidAddress(format!("field {}", col_idx + 1)))?;
                grid.set_value_at(row, col, Self::detect_type(field));
            }
        }

        Ok(grid)
    }

    /// Detect the type of a field value
    fn detect_type(field: &str) -> CellValue {
        if field.is_empty() {
            return CellValue::Empty;
        }

        match field.parse::<f64>() {
            Ok(n) if !n.is_nan() => CellValue::Number(n),
            _ => CellValue::text(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_type() {
        assert_eq!(CsvReader::detect_type(""), CellValue::Empty);
        assert_eq!(CsvReader::detect_type("42"), CellValue::Number(42.0));
        assert_eq!(CsvReader::detect_type("-1.5e2"), CellValue::Number(-150.0));
        assert_eq!(CsvReader::detect_type("12px"), CellValue::text("12px"));
        assert_eq!(CsvReader::detect_type("=A1+1"), CellValue::text("=A1+1"));
        assert_eq!(CsvReader::detect_type("NaN"), CellValue::text("NaN"));
        assert_eq!(CsvReader::detect_type(" 7"), CellValue::text(" 7"));
    }

    #[test]
    fn test_read() {
        let data = "10,20,=A1+B1\n,hello\n5\n";
        let grid = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();

        assert_eq!(grid.get_value_at(0, 0), CellValue::Number(10.0));
        assert_eq!(grid.get_value_at(0, 2), CellValue::text("=A1+B1"));
        assert_eq!(grid.get_value_at(1, 0), CellValue::Empty);
        assert_eq!(grid.get_value_at(1, 1), CellValue::text("hello"));
        assert_eq!(grid.get_value_at(2, 0), CellValue::Number(5.0));
        assert_eq!(grid.len(), 5);
    }

    #[test]
    fn test_read_with_header_and_options() {
        let data = "a;b\n 1 ;\"x;y\"\n";
        let options = CsvReadOptions {
            delimiter: b';',
            has_header: true,
            trim: true,
            ..Default::default()
        };
        let grid = CsvReader::read(data.as_bytes(), &options).unwrap();

        assert_eq!(grid.get_value_at(0, 0), CellValue::Number(1.0));
        assert_eq!(grid.get_value_at(0, 1), CellValue::text("x;y"));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_read_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"1,2,=SUM(A1:B1)\r\n\"quoted, text\"\r\n").unwrap();

        let grid = CsvReader::read_file(file.path(), &CsvReadOptions::default()).unwrap();

        assert_eq!(grid.get_value_at(0, 0), CellValue::Number(1.0));
        assert_eq!(grid.get_value_at(0, 1), CellValue::Number(2.0));
        assert_eq!(grid.get_value_at(0, 2), CellValue::text("=SUM(A1:B1)"));
        assert_eq!(grid.get_value_at(1, 0), CellValue::text("quoted, text"));
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_read_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let result = CsvReader::read_file(path, &CsvReadOptions::default());

        assert!(matches!(result, Err(crate::CsvError::Io(_))));
    }
}
