//! Evaluation options

/// Options for formula evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvaluationOptions {
    /// Largest range a function argument may expand to (default: 1,000,000)
    ///
    /// Ranges over the limit fail before any cell is looked up.
    pub max_range_cells: u64,
}

impl EvaluationOptions {
    /// Default limit on expanded range size
    pub const DEFAULT_MAX_RANGE_CELLS: u64 = 1_000_000;
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            max_range_cells: Self::DEFAULT_MAX_RANGE_CELLS,
        }
    }
}
