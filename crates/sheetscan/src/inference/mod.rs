//! Inference engine: table width, header row and column types.

mod classifier;
mod header;
mod shape;

pub use classifier::{type_guess, TypeClassifier, TypeTally, VotingMode};
pub use header::{headers_guess, HeaderGuess, HeaderLocator};
pub use shape::{column_count_modal, RowShapeAnalyzer};
