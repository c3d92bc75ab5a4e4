//! Column schema definition.

use serde::{Deserialize, Serialize};

use super::types::InferredType;
use crate::inference::TypeTally;

/// Schema for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Zero-based position in the sheet.
    pub position: usize,
    /// Header text at this position, when the header row has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Inferred data type.
    pub inferred_type: InferredType,
    /// Votes that decided the type.
    pub tally: TypeTally,
}

impl ColumnSchema {
    /// Create a column schema from its classification.
    pub fn new(position: usize, name: Option<String>, tally: TypeTally) -> Self {
        Self {
            position,
            name,
            inferred_type: tally.inferred_type(),
            tally,
        }
    }

    /// The header name, or a generated `column_N` label (1-based).
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("column_{}", self.position + 1))
    }
}
