use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// ColumnRange – the target time points of a row
// ---------------------------------------------------------------------------

/// Inclusive, 0-based range of value columns (the gene identifier is not a column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnRange {
    pub start: usize,
    pub end: usize,
}

impl ColumnRange {
    /// Callers guarantee `start <= end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "column range {start}..={end} is inverted");
        ColumnRange { start, end }
    }

    /// Number of values a complete window holds.
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Row – one line of the expression table
// ---------------------------------------------------------------------------

/// A gene and its expression values in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub gene_id: String,
    /// Leading numeric values; stops at the first token that is not a number.
    pub values: Vec<f64>,
}

impl Row {
    /// The values inside `range`, or `None` when the row is too short to fill it.
    pub fn window(&self, range: ColumnRange) -> Option<&[f64]> {
        self.values.get(range.start..=range.end)
    }
}
