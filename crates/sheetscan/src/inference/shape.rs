//! Modal row width detection.

use std::collections::HashMap;

use tracing::trace;

use crate::sample::{populated_count, Cell, Emptiness, Row};

/// Estimates how many columns a table has from the populated widths of its
/// rows.
#[derive(Debug, Clone, Default)]
pub struct RowShapeAnalyzer {
    emptiness: Emptiness,
}

impl RowShapeAnalyzer {
    /// Create an analyzer with the default emptiness policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different rule for which cells count as empty.
    pub fn with_emptiness(mut self, emptiness: Emptiness) -> Self {
        self.emptiness = emptiness;
        self
    }

    /// The emptiness policy in use.
    pub fn emptiness(&self) -> Emptiness {
        self.emptiness
    }

    /// Number of non-empty cells in `row`.
    pub fn populated(&self, row: &[Cell]) -> usize {
        populated_count(row, self.emptiness)
    }

    /// The most frequent non-empty cell count across `rows`.
    ///
    /// Rows with one or no populated cells are left out of the tally, since
    /// titles and blank separators say nothing about table width. Equal
    /// frequencies resolve to the larger count. Returns 0 when no row
    /// qualifies.
    pub fn modal_width(&self, rows: &[Row]) -> usize {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for row in rows {
            let length = self.populated(row);
            if length > 1 {
                *counts.entry(length).or_insert(0) += 1;
            }
        }

        let modal = counts
            .into_iter()
            .max_by_key(|&(length, freq)| (freq, length))
            .map(|(length, _)| length)
            .unwrap_or(0);

        trace!(rows = rows.len(), modal, "computed modal row width");
        modal
    }
}

/// The modal non-empty cell count of `rows` under the default policy.
pub fn column_count_modal(rows: &[Row]) -> usize {
    RowShapeAnalyzer::new().modal_width(rows)
}
