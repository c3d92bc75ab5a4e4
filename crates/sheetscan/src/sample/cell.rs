//! A single spreadsheet cell and the rules for calling it empty.

use std::fmt;

use chrono::NaiveDateTime;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::schema::TypeTag;

/// Raw scalar held by a cell.
///
/// Deserializing never produces `Date`: strings always come back as `Text`.
/// Turning a date-tagged string into a date is up to the reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value at all.
    Empty,
    Bool(bool),
    Number(f64),
    Date(NaiveDateTime),
    Text(String),
}

impl CellValue {
    /// Returns true if the cell holds nothing, not even an empty string.
    pub fn is_absent(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns true if the value is a zero-equivalent: absent, an empty
    /// string, zero or false.
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(n) => *n == 0.0,
            CellValue::Bool(b) => !b,
            CellValue::Date(_) => false,
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CellValueVisitor)
    }
}

struct CellValueVisitor;

impl<'de> Visitor<'de> for CellValueVisitor {
    type Value = CellValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a boolean, a number or a string")
    }

    fn visit_unit<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Empty)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<CellValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        CellValue::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<CellValue, E> {
        Ok(CellValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<CellValue, E> {
        Ok(CellValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<CellValue, E> {
        Ok(CellValue::Text(v))
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
            // Whole numbers print without a trailing ".0".
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// Which cell values count as empty.
///
/// `Falsy` treats a numeric zero and `false` as missing, like a truthiness
/// check would. `Absent` only treats a missing value or an empty string as
/// missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emptiness {
    Falsy,
    Absent,
}

impl Emptiness {
    /// Returns true if `value` is empty under this policy.
    pub fn is_empty(&self, value: &CellValue) -> bool {
        match self {
            Emptiness::Falsy => value.is_falsy(),
            Emptiness::Absent => value.is_absent(),
        }
    }
}

impl Default for Emptiness {
    fn default() -> Self {
        Emptiness::Falsy
    }
}

/// One cell of a row: a value and the type tag its producer assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub value: CellValue,
    #[serde(default = "unknown_tag")]
    pub data_type: TypeTag,
}

fn unknown_tag() -> TypeTag {
    TypeTag::Unknown
}

impl Cell {
    /// Create a cell from a value and tag.
    pub fn new(value: CellValue, data_type: TypeTag) -> Self {
        Self { value, data_type }
    }

    /// An empty cell.
    pub fn empty() -> Self {
        Self::new(CellValue::Empty, TypeTag::Unknown)
    }

    /// A string cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(CellValue::Text(value.into()), TypeTag::String)
    }

    /// A numeric cell.
    pub fn number(value: f64) -> Self {
        Self::new(CellValue::Number(value), TypeTag::Numeric)
    }

    /// A boolean cell.
    pub fn boolean(value: bool) -> Self {
        Self::new(CellValue::Bool(value), TypeTag::Boolean)
    }

    /// A date cell.
    pub fn date(value: NaiveDateTime) -> Self {
        Self::new(CellValue::Date(value), TypeTag::Date)
    }

    /// An error cell carrying the literal the spreadsheet displayed.
    pub fn error(literal: impl Into<String>) -> Self {
        Self::new(CellValue::Text(literal.into()), TypeTag::Error)
    }
}
