//! Reading row samples from files.
//!
//! These readers stand in for a spreadsheet parser: they turn delimited text
//! or a JSON dump of tagged cells into a [`RowSample`](crate::sample::RowSample).

mod reader;
mod source;
mod tagger;

pub use reader::{ReaderConfig, SampleReader};
pub use source::SourceMetadata;
pub use tagger::CellTagger;
