//! Cells, rows and samples consumed by the inference engine.

mod cell;
mod grid;

pub use cell::{Cell, CellValue, Emptiness};
pub use grid::{column_views, populated_count, ColumnView, Row, RowSample};
