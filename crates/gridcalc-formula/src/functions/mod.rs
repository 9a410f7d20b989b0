//! Built-in aggregate functions
//!
//! Function calls are recognised by prefix on the formula body rather than by
//! the arithmetic parser: `SUM(` followed by everything up to the first `)`.
//! Text after that `)` is ignored.

pub mod aggregate;

use crate::error::{FormulaError, FormulaResult};
use crate::options::EvaluationOptions;
use gridcalc_core::{parse_cell_reference, CellRange, CellReference, CellSource};

/// Function implementation signature
///
/// Receives the expanded argument cells in row-major order.
pub type FunctionImpl = fn(&[CellReference], &dyn CellSource) -> f64;

/// Function definition
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Implementation
    pub implementation: FunctionImpl,
}

/// Built-in functions, in the order they are tried
pub static BUILTIN_FUNCTIONS: &[FunctionDef] = &[
    FunctionDef {
        name: "SUM",
        implementation: aggregate::fn_sum,
    },
    FunctionDef {
        name: "AVERAGE",
        implementation: aggregate::fn_average,
    },
    FunctionDef {
        name: "COUNT",
        implementation: aggregate::fn_count,
    },
    FunctionDef {
        name: "MAX",
        implementation: aggregate::fn_max,
    },
    FunctionDef {
        name: "MIN",
        implementation: aggregate::fn_min,
    },
];

/// A function call recognised at the start of a formula body
#[derive(Clone, Copy)]
pub struct FunctionCall<'a> {
    pub function: &'static FunctionDef,
    /// Trimmed text between `NAME(` and the first `)`
    pub argument: &'a str,
}

impl std::fmt::Debug for FunctionCall<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionCall")
            .field("function", &self.function.name)
            .field("argument", &self.argument)
            .finish()
    }
}

/// Match `body` against the built-in function prefixes
///
/// A body selects a function when it starts with `NAME(` (any case). The
/// argument is taken from the first `NAME(` occurrence, at the start or
/// later, that is followed by a `)` with at least one character in between,
/// so `SUM()+SUM(A1)` sums `A1`.
pub fn match_function_call(body: &str) -> Option<FunctionCall<'_>> {
    BUILTIN_FUNCTIONS.iter().find_map(|function| {
        let head = body.get(..function.name.len())?;
        if !head.eq_ignore_ascii_case(function.name) {
            return None;
        }
        let argument = find_argument(body, function.name)?;
        Some(FunctionCall { function, argument })
    })
}

fn find_argument<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    let upper = body.to_ascii_uppercase();
    let mut from = 0;
    while let Some(offset) = upper[from..].find(name) {
        let open = from + offset + name.len();
        from += offset + 1;
        let Some(rest) = body[open..].strip_prefix('(') else {
            continue;
        };
        match rest.find(')')? {
            0 => continue,
            close => return Some(rest[..close].trim()),
        }
    }
    None
}

/// Resolve a function argument to the block of cells it addresses
///
/// Tries a range first, then a single reference. Anything else falls back to
/// `A1` alone.
pub fn resolve_argument(argument: &str) -> CellRange {
    CellRange::parse(argument)
        .or_else(|| parse_cell_reference(argument).map(CellRange::single))
        .unwrap_or_else(|| CellRange::single(CellReference::new(0, 0)))
}

impl FunctionCall<'_> {
    /// Expand the argument and run the function
    pub fn evaluate(
        &self,
        source: &dyn CellSource,
        options: &EvaluationOptions,
    ) -> FormulaResult<f64> {
        let range = resolve_argument(self.argument);

        let cells = range.cell_count();
        if cells > options.max_range_cells {
            return Err(FormulaError::RangeTooLarge {
                cells,
                limit: options.max_range_cells,
            });
        }

        let cells: Vec<CellReference> = range.cells().collect();
        Ok((self.function.implementation)(&cells, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_match_function_call() {
        let call = match_function_call("SUM(A1:A3)").unwrap();
        assert_eq!(call.function.name, "SUM");
        assert_eq!(call.argument, "A1:A3");

        let call = match_function_call("average( B2 )").unwrap();
        assert_eq!(call.function.name, "AVERAGE");
        assert_eq!(call.argument, "B2");

        // Only the text up to the first ')' is the argument
        let call = match_function_call("MAX(A1:A2)+100").unwrap();
        assert_eq!(call.argument, "A1:A2");

        let call = match_function_call("MIN((A1)").unwrap();
        assert_eq!(call.argument, "(A1");
    }

    #[test]
    fn test_match_function_call_later_occurrence() {
        let call = match_function_call("SUM()+SUM(A1)").unwrap();
        assert_eq!(call.function.name, "SUM");
        assert_eq!(call.argument, "A1");

        let call = match_function_call("Max()*xmax( B1:B2 )").unwrap();
        assert_eq!(call.function.name, "MAX");
        assert_eq!(call.argument, "B1:B2");
    }

    #[test]
    fn test_match_function_call_misses() {
        assert!(match_function_call("SUM()").is_none());
        assert!(match_function_call("SUM(A1").is_none());
        assert!(match_function_call("SUM (A1)").is_none());
        assert!(match_function_call("AVG(A1)").is_none());
        assert!(match_function_call("A1+SUM(A2)").is_none());
        assert!(match_function_call("SU").is_none());
        assert!(match_function_call("SUM()+SUM(A1").is_none());
        assert!(match_function_call("SUM()+1").is_none());
    }

    #[test]
    fn test_resolve_argument() {
        assert_eq!(resolve_argument("A1:B2").to_string(), "A1:B2");
        assert_eq!(resolve_argument("C3").to_string(), "C3:C3");
        // Unparseable arguments fall back to A1
        assert_eq!(resolve_argument("5").to_string(), "A1:A1");
        assert_eq!(resolve_argument("A1, B2").to_string(), "A1:A1");
        assert_eq!(resolve_argument("").to_string(), "A1:A1");
    }
}
