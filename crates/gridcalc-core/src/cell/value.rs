//! Cell value types and numeric coercion

use lazy_regex::regex_find;
use std::fmt;

/// The raw contents of a cell as supplied by the host grid
///
/// `Empty` stands in for a host's null/undefined "no such cell" marker.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Numeric value
    Number(f64),

    /// Text value, including formula source such as `=A1+1`
    Text(String),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Coerce the value to a number the way formulas read cells
    ///
    /// Numbers pass through untouched, NaN included. Everything else goes
    /// through [`parse_float_prefix`], and a missing, NaN or zero parse
    /// becomes `0`.
    ///
    /// ```
    /// use gridcalc_core::CellValue;
    ///
    /// assert_eq!(CellValue::text("12.5kg").coerce_number(), 12.5);
    /// assert_eq!(CellValue::text("n/a").coerce_number(), 0.0);
    /// assert_eq!(CellValue::Empty.coerce_number(), 0.0);
    /// ```
    pub fn coerce_number(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => match parse_float_prefix(s) {
                Some(n) if !n.is_nan() && n != 0.0 => n,
                _ => 0.0,
            },
            CellValue::Empty => 0.0,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// Parse the longest leading decimal number in `s`
///
/// Leading whitespace is skipped, an optional sign is accepted, and
/// `Infinity` is recognised. Trailing garbage is ignored, so `"42px"` gives
/// `42`. Returns `None` when no number starts the string.
///
/// ```
/// use gridcalc_core::parse_float_prefix;
///
/// assert_eq!(parse_float_prefix("  -3.5e2 apples"), Some(-350.0));
/// assert_eq!(parse_float_prefix(".5"), Some(0.5));
/// assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
/// assert_eq!(parse_float_prefix("abc"), None);
/// ```
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let matched = regex_find!(
        r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)",
        s
    )?;
    matched.parse().ok()
}

/// Format a number the way a browser host would print it
///
/// Integral values have no fractional part, infinities print as
/// `Infinity`/`-Infinity` and negative zero prints as `0`. Magnitudes of at
/// least `1e21` or below `1e-6` use exponent notation with a signed
/// exponent, e.g. `1e+21` and `1.5e-7`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        n.to_string()
    }
}
