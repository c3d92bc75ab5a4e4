//! Header row location.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::shape::RowShapeAnalyzer;
use crate::sample::{Emptiness, Row};

/// Where the header row sits and what it says.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderGuess {
    /// Zero-based index of the header row in the sample.
    pub offset: usize,
    /// Text of the non-empty header cells, in column order.
    pub headers: Vec<String>,
}

impl HeaderGuess {
    /// Returns true if a usable header was found.
    ///
    /// An offset of 0 with no names means "no header", not "header on the
    /// first row".
    pub fn is_found(&self) -> bool {
        !self.headers.is_empty()
    }

    /// The header offset to exclude from type evidence, if any.
    pub fn data_offset(&self) -> Option<usize> {
        self.is_found().then_some(self.offset)
    }
}

/// Finds the first row that is about as wide as the table.
#[derive(Debug, Clone)]
pub struct HeaderLocator {
    shape: RowShapeAnalyzer,
    tolerance: usize,
}

impl HeaderLocator {
    /// Create a locator that accepts rows one cell short of the modal width.
    pub fn new() -> Self {
        Self {
            shape: RowShapeAnalyzer::new(),
            tolerance: 1,
        }
    }

    /// Set how many cells short of the modal width a header may be.
    pub fn with_tolerance(mut self, tolerance: usize) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Use a different rule for which cells count as empty.
    pub fn with_emptiness(mut self, emptiness: Emptiness) -> Self {
        self.shape = self.shape.with_emptiness(emptiness);
        self
    }

    /// The tolerance in use.
    pub fn tolerance(&self) -> usize {
        self.tolerance
    }

    /// Locate the header row of `rows`.
    ///
    /// Returns the first row whose populated width is at least the modal
    /// width minus the tolerance. Every row is inspected, including ones too
    /// narrow to count towards the modal width. When nothing qualifies the
    /// result is offset 0 with no names.
    pub fn locate(&self, rows: &[Row]) -> HeaderGuess {
        self.locate_with_modal(rows, self.shape.modal_width(rows))
    }

    /// Locate the header row against a modal width the caller has already
    /// computed for the same `rows` and emptiness policy.
    pub fn locate_with_modal(&self, rows: &[Row], modal: usize) -> HeaderGuess {
        let emptiness = self.shape.emptiness();

        for (offset, row) in rows.iter().enumerate() {
            let length = self.shape.populated(row);
            if length + self.tolerance >= modal {
                let headers: Vec<String> = row
                    .iter()
                    .filter(|c| !emptiness.is_empty(&c.value))
                    .map(|c| c.value.to_string())
                    .collect();
                debug!(offset, modal, columns = headers.len(), "located header row");
                return HeaderGuess { offset, headers };
            }
        }

        debug!(modal, "no header row within tolerance");
        HeaderGuess::default()
    }
}

impl Default for HeaderLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Guess the header row of `rows`, allowing it to be `tolerance` cells
/// narrower than the modal width.
pub fn headers_guess(rows: &[Row], tolerance: usize) -> HeaderGuess {
    HeaderLocator::new().with_tolerance(tolerance).locate(rows)
}
