//! Formula detection

use lazy_regex::regex_is_match;

/// Decide whether a cell's text should be evaluated instead of displayed
///
/// True when the trimmed text starts with `=`, starts with a bare aggregate
/// call such as `sum(` (any case), or contains uppercase letters directly
/// followed by digits anywhere. The last rule is deliberately loose: text
/// like `"Q3 budget"` counts as a formula.
///
/// ```
/// use gridcalc_formula::is_formula;
///
/// assert!(is_formula("=1+1"));
/// assert!(is_formula("SUM(A1:A2)"));
/// assert!(is_formula("avg(x)"));
/// assert!(is_formula("see B12"));
/// assert!(!is_formula("hello"));
/// assert!(!is_formula(""));
/// ```
pub fn is_formula(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }

    trimmed.starts_with('=')
        || regex_is_match!(r"(?i)^(?:SUM|AVG|AVERAGE|COUNT|MIN|MAX)\(", trimmed)
        || regex_is_match!(r"[A-Z]+[0-9]+", trimmed)
}
