//! Schema types for representing inferred sample structure.

mod column;
mod table;
mod types;

pub use column::ColumnSchema;
pub use table::SampleSchema;
pub use types::{InferredType, TypeTag, TypeWeights};
