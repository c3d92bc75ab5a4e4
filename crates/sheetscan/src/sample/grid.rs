//! Row-major samples and their column-major views.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Emptiness};

/// An ordered sequence of cells. Rows of one sample may differ in length.
pub type Row = Vec<Cell>;

/// Number of cells in `row` that are non-empty under `emptiness`.
pub fn populated_count(row: &[Cell], emptiness: Emptiness) -> usize {
    row.iter().filter(|c| !emptiness.is_empty(&c.value)).count()
}

/// A materialized sample of rows taken from the top of a sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowSample {
    rows: Vec<Row>,
}

impl RowSample {
    /// Create a sample from rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// The rows, in sheet order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Mutable access to the rows, for readers that fix up cell values.
    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Number of rows in the sample.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the sample has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Keep only the first `max_rows` rows.
    pub fn truncate(&mut self, max_rows: usize) {
        self.rows.truncate(max_rows);
    }

    /// Regroup the sample column by column, one view per position up to the
    /// widest row.
    pub fn columns(&self) -> Vec<ColumnView<'_>> {
        column_views(&self.rows)
    }
}

/// Regroup `rows` column by column, one view per position up to the widest
/// row.
pub fn column_views(rows: &[Row]) -> Vec<ColumnView<'_>> {
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    (0..width)
        .map(|index| {
            let entries = rows
                .iter()
                .enumerate()
                .filter_map(|(row, cells)| cells.get(index).map(|cell| (row, cell)))
                .collect();
            ColumnView { index, entries }
        })
        .collect()
}

impl From<Vec<Row>> for RowSample {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// The cells found at one column position across a sample.
///
/// Each entry keeps the index of the row it came from, so rows too short to
/// reach this column leave a gap instead of shifting later cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView<'a> {
    index: usize,
    entries: Vec<(usize, &'a Cell)>,
}

impl<'a> ColumnView<'a> {
    /// Build a view over a dense column; entry `i` came from row `i`.
    pub fn from_cells(index: usize, cells: &'a [Cell]) -> Self {
        Self {
            index,
            entries: cells.iter().enumerate().collect(),
        }
    }

    /// Zero-based column position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of cells present in this column.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no row reaches this column.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(row index, cell)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a Cell)> + '_ {
        self.entries.iter().copied()
    }
}
