//! Sheetscan: header row detection and column type inference for ragged
//! spreadsheet samples.
//!
//! Sheetscan looks at the first rows of a sheet, before the data is loaded
//! into a typed store, and decides two things: which row holds the column
//! headers, and which primitive type each column should get.
//!
//! # Core Principles
//!
//! - **Shape-driven headers**: The header is the first row about as wide as
//!   the table, where width is the most common populated row length
//! - **Weighted votes**: Each cell's type tag votes for its type; specific
//!   types carry more weight than text
//! - **Deterministic**: Every tie has a fixed resolution, and nothing here
//!   fails on malformed input
//!
//! # Example
//!
//! ```
//! use sheetscan::{headers_guess, type_guess, Cell, InferredType, RowSample};
//!
//! let sample = RowSample::new(vec![
//!     vec![Cell::text("Monthly totals")],
//!     vec![Cell::text("month"), Cell::text("paid"), Cell::text("amount")],
//!     vec![Cell::text("jan"), Cell::boolean(true), Cell::number(120.0)],
//!     vec![Cell::text("feb"), Cell::boolean(true), Cell::number(98.5)],
//! ]);
//!
//! let header = headers_guess(sample.rows(), 1);
//! assert_eq!(header.offset, 1);
//! assert_eq!(header.headers, vec!["month", "paid", "amount"]);
//!
//! let types = type_guess(&sample.columns(), false, Some(header.offset));
//! assert_eq!(
//!     types,
//!     vec![InferredType::String, InferredType::Boolean, InferredType::Integer]
//! );
//! ```

pub mod error;
pub mod inference;
pub mod input;
pub mod sample;
pub mod schema;

mod sheetscan;

pub use crate::sheetscan::{InferenceResult, Sheetscan, SheetscanConfig};
pub use error::{Result, SheetscanError};
pub use inference::{
    column_count_modal, headers_guess, type_guess, HeaderGuess, HeaderLocator, RowShapeAnalyzer,
    TypeClassifier, TypeTally, VotingMode,
};
pub use input::{CellTagger, ReaderConfig, SampleReader, SourceMetadata};
pub use sample::{Cell, CellValue, ColumnView, Emptiness, Row, RowSample};
pub use schema::{ColumnSchema, InferredType, SampleSchema, TypeTag, TypeWeights};
