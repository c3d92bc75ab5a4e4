//! Cell type tags, inferred column types and the guessing weight table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type tag attached to a single cell by the producer of the sample.
///
/// Tags deserialize from openpyxl-style codes (`"s"`, `"n"`, `"b"`, `"d"`,
/// `"e"`) as well as from their lower-case names. Anything unrecognized
/// becomes [`TypeTag::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeTag {
    /// Text.
    String,
    /// Any number, integral or fractional.
    Numeric,
    /// True/false.
    Boolean,
    /// Date or date-time.
    Date,
    /// Spreadsheet error value (`#N/A`, `#DIV/0!`, ...).
    Error,
    /// Tag the producer could not classify (formulas, rich text, ...).
    Unknown,
}

impl TypeTag {
    /// All tags, lowest tie-break priority first.
    pub const ALL: [TypeTag; 6] = [
        TypeTag::Unknown,
        TypeTag::Error,
        TypeTag::String,
        TypeTag::Boolean,
        TypeTag::Numeric,
        TypeTag::Date,
    ];

    /// Parse a tag from a producer code or name.
    pub fn from_code(code: &str) -> Self {
        match code {
            "s" | "str" | "inlineStr" | "string" => TypeTag::String,
            "n" | "numeric" => TypeTag::Numeric,
            "b" | "boolean" => TypeTag::Boolean,
            "d" | "date" => TypeTag::Date,
            "e" | "error" => TypeTag::Error,
            _ => TypeTag::Unknown,
        }
    }

    /// The canonical lower-case name of this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Numeric => "numeric",
            TypeTag::Boolean => "boolean",
            TypeTag::Date => "date",
            TypeTag::Error => "error",
            TypeTag::Unknown => "unknown",
        }
    }

    /// Tie-break rank when two tags carry the same weight. Higher wins, so
    /// more specific types beat generic text.
    pub fn priority(&self) -> u8 {
        match self {
            TypeTag::Unknown => 0,
            TypeTag::Error => 1,
            TypeTag::String => 2,
            TypeTag::Boolean => 3,
            TypeTag::Numeric => 4,
            TypeTag::Date => 5,
        }
    }
}

impl From<String> for TypeTag {
    fn from(code: String) -> Self {
        TypeTag::from_code(&code)
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        tag.as_str().to_string()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final type decided for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferredType {
    /// Text values. Also the fallback when there is no usable evidence.
    String,
    /// Numbers. Fractional values are reported here as well.
    Integer,
    /// Boolean values (true/false).
    Boolean,
    /// Date and/or time values.
    Date,
}

impl InferredType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, InferredType::Integer)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, InferredType::Date)
    }
}

impl Default for InferredType {
    fn default() -> Self {
        InferredType::String
    }
}

impl From<TypeTag> for InferredType {
    fn from(tag: TypeTag) -> Self {
        match tag {
            TypeTag::String => InferredType::String,
            TypeTag::Numeric => InferredType::Integer,
            TypeTag::Boolean => InferredType::Boolean,
            TypeTag::Date => InferredType::Date,
            TypeTag::Error | TypeTag::Unknown => InferredType::String,
        }
    }
}

impl fmt::Display for InferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InferredType::String => "string",
            InferredType::Integer => "integer",
            InferredType::Boolean => "boolean",
            InferredType::Date => "date",
        };
        f.write_str(name)
    }
}

/// Per-tag guessing weights used when voting on a column type.
///
/// Error and unknown tags always weigh zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeWeights {
    pub string: u32,
    pub numeric: u32,
    pub boolean: u32,
    pub date: u32,
}

impl TypeWeights {
    /// The messytables guessing weights.
    pub const DEFAULT: TypeWeights = TypeWeights {
        string: 1,
        numeric: 6,
        boolean: 7,
        date: 3,
    };

    /// Weight of a single vote for `tag`.
    pub fn weight(&self, tag: TypeTag) -> u32 {
        match tag {
            TypeTag::String => self.string,
            TypeTag::Numeric => self.numeric,
            TypeTag::Boolean => self.boolean,
            TypeTag::Date => self.date,
            TypeTag::Error | TypeTag::Unknown => 0,
        }
    }
}

impl Default for TypeWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}
