//! Cell reference and range types

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A zero-based cell position parsed from an A1-style address (e.g., "B12")
///
/// Column letters use bijective base-26 numbering (A=1 ... Z=26, AA=27 ...)
/// and row numbers are 1-based in text; both are stored 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellReference {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., Z=25, AA=26)
    pub col: u32,
}

impl CellReference {
    /// Create a new cell reference
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse an A1-style address
    ///
    /// The whole input must be letters followed by digits. Surrounding
    /// whitespace, `$` markers, a zero row and values outside `u32` are all
    /// rejected.
    ///
    /// # Examples
    /// ```
    /// use gridcalc_core::CellReference;
    ///
    /// let cell = CellReference::parse("AA1").unwrap();
    /// assert_eq!(cell.row, 0);
    /// assert_eq!(cell.col, 26);
    ///
    /// assert!(CellReference::parse("A0").is_none());
    /// assert!(CellReference::parse("1A").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == 0 {
            return None;
        }
        let col = letters_to_column_index(&s[..pos])?;

        let row_str = &s[pos..];
        if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let row = row_str
            .bytes()
            .try_fold(0u64, |acc, b| {
                acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
            })?;

        // Rows are 1-based in text
        if row == 0 {
            return None;
        }
        let row = u32::try_from(row - 1).ok()?;

        Some(Self { row, col })
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        cell_reference_to_string(self.row, self.col)
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::InvalidAddress(format!("'{}'", s)))
    }
}

/// Parse an A1-style address, returning `None` if it is malformed
pub fn parse_cell_reference(reference: &str) -> Option<CellReference> {
    CellReference::parse(reference)
}

/// Format a zero-based row/column pair as an A1-style address
///
/// ```
/// use gridcalc_core::{cell_reference_to_string, parse_cell_reference, CellReference};
///
/// assert_eq!(cell_reference_to_string(0, 0), "A1");
/// assert_eq!(cell_reference_to_string(99, 27), "AB100");
/// assert_eq!(parse_cell_reference("AB100"), Some(CellReference::new(99, 27)));
/// ```
pub fn cell_reference_to_string(row: u32, col: u32) -> String {
    let mut result = column_index_to_letters(col);
    result.push_str(&(u64::from(row) + 1).to_string());
    result
}

/// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn column_index_to_letters(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(col) + 1; // 1-based for calculation

    while n > 0 {
        n -= 1;
        letters.push((n % 26) as u8 + b'A');
        n /= 26;
    }

    letters.iter().rev().map(|&b| b as char).collect()
}

/// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
///
/// Letters are case-insensitive. Returns `None` for an empty string, a
/// non-letter, or a column past `u32::MAX`.
pub fn letters_to_column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }

    let mut col: u64 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = u64::from(c.to_ascii_uppercase() as u8 - b'A' + 1);
        col = col.checked_mul(26)?.checked_add(digit)?;
    }

    u32::try_from(col - 1).ok()
}

/// A rectangular block of cells (e.g., "A1:B10")
///
/// Unlike most spreadsheet APIs the corners are kept exactly as written. A
/// range whose start lies below or to the right of its end is empty rather
/// than flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    /// Start corner, as written
    pub start: CellReference,
    /// End corner, as written
    pub end: CellReference,
}

impl CellRange {
    /// Create a new cell range without reordering the corners
    pub fn new(start: CellReference, end: CellReference) -> Self {
        Self { start, end }
    }

    /// Create a single-cell range
    pub fn single(cell: CellReference) -> Self {
        Self {
            start: cell,
            end: cell,
        }
    }

    /// Parse a range from `START:END` notation
    ///
    /// Each side is trimmed before parsing. Anything after a second `:` is
    /// ignored, so `"A1:B2:C3"` parses as `A1:B2`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(':');
        let start = CellReference::parse(parts.next()?.trim())?;
        let end = CellReference::parse(parts.next()?.trim())?;
        Some(Self::new(start, end))
    }

    /// Whether the range addresses no cells at all
    pub fn is_empty(&self) -> bool {
        self.start.row > self.end.row || self.start.col > self.end.col
    }

    /// Check if a cell is within this range
    pub fn contains(&self, cell: &CellReference) -> bool {
        cell.row >= self.start.row
            && cell.row <= self.end.row
            && cell.col >= self.start.col
            && cell.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            u64::from(self.end.row - self.start.row) + 1
        }
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            u64::from(self.end.col - self.start.col) + 1
        }
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count().saturating_mul(self.col_count())
    }

    /// Iterate over all cell references in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: u64::from(self.start.row),
            current_col: u64::from(self.start.col),
        }
    }

    /// Format as A1:B10 string
    pub fn to_a1_string(&self) -> String {
        format!("{}:{}", self.start.to_a1_string(), self.end.to_a1_string())
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::InvalidRange(format!("'{}'", s)))
    }
}

/// Expand a `START:END` range into its cells in row-major order
///
/// Returns `None` if either side is missing or malformed. An inverted range
/// expands to an empty list.
pub fn parse_cell_range(range: &str) -> Option<Vec<CellReference>> {
    CellRange::parse(range).map(|r| r.cells().collect())
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    // Widened so the final increment cannot overflow at u32::MAX
    current_row: u64,
    current_col: u64,
}

impl CellRangeIterator {
    fn remaining(&self) -> u64 {
        if self.range.is_empty() || self.current_row > u64::from(self.range.end.row) {
            return 0;
        }
        let full_rows = u64::from(self.range.end.row) - self.current_row;
        let in_row = u64::from(self.range.end.col) - self.current_col + 1;
        full_rows
            .saturating_mul(self.range.col_count())
            .saturating_add(in_row)
    }
}

impl Iterator for CellRangeIterator {
    type Item = CellReference;

    fn next(&mut self) -> Option<Self::Item> {
        if self.range.is_empty() || self.current_row > u64::from(self.range.end.row) {
            return None;
        }

        let cell = CellReference::new(self.current_row as u32, self.current_col as u32);

        // Move to next cell
        self.current_col += 1;
        if self.current_col > u64::from(self.range.end.col) {
            self.current_col = u64::from(self.range.start.col);
            self.current_row += 1;
        }

        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellRangeIterator {}
