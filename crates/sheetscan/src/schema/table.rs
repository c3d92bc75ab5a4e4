//! Sample-level schema definition.

use serde::{Deserialize, Serialize};

use super::column::ColumnSchema;
use super::types::InferredType;
use crate::inference::HeaderGuess;

/// Everything inferred about one sample: its header and column types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSchema {
    /// The located header row.
    pub header: HeaderGuess,
    /// Most frequent populated row width.
    pub modal_width: usize,
    /// One schema per column position, in order.
    pub columns: Vec<ColumnSchema>,
}

impl SampleSchema {
    /// Get a column by header name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns
            .iter()
            .find(|c| c.name.as_deref() == Some(name))
    }

    /// Get a column by position.
    pub fn get_column_by_position(&self, position: usize) -> Option<&ColumnSchema> {
        self.columns.get(position)
    }

    /// Inferred types in column order.
    pub fn column_types(&self) -> Vec<InferredType> {
        self.columns.iter().map(|c| c.inferred_type).collect()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of the first data row: the row after the header, or 0 when no
    /// header was found.
    pub fn first_data_row(&self) -> usize {
        self.header.data_offset().map_or(0, |offset| offset + 1)
    }
}
