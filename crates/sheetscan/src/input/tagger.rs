//! Tagging raw text fields as typed cells.
//!
//! Delimited text carries no type information, so the reader plays the role
//! of a spreadsheet parser and assigns each field the tag a spreadsheet would
//! have stored for it.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::sample::{Cell, CellValue};
use crate::schema::TypeTag;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

static ERROR_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(N/A|NULL!|DIV/0!|VALUE!|REF!|NAME\?|NUM!|GETTING_DATA)$").unwrap()
});

// Cheap shape check before trying every chrono layout.
static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,4}[-/.]\d{1,2}[-/.]\d{1,4}").unwrap());

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // ISO date
    "%Y/%m/%d", // Alt ISO
    "%m/%d/%Y", // US date
    "%d-%m-%Y", // European date
    "%d.%m.%Y",
];

/// Assigns a value and type tag to raw text fields.
#[derive(Debug, Clone)]
pub struct CellTagger {
    trim: bool,
}

impl CellTagger {
    /// Create a tagger that trims surrounding whitespace.
    pub fn new() -> Self {
        Self { trim: true }
    }

    /// Set whether surrounding whitespace is trimmed before tagging.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Tag a single field.
    pub fn tag(&self, raw: &str) -> Cell {
        let text = if self.trim { raw.trim() } else { raw };

        if text.is_empty() {
            return Cell::empty();
        }
        if ERROR_LITERAL.is_match(text) {
            return Cell::error(text);
        }
        if text.eq_ignore_ascii_case("true") {
            return Cell::boolean(true);
        }
        if text.eq_ignore_ascii_case("false") {
            return Cell::boolean(false);
        }
        if let Some(number) = parse_number(text) {
            return Cell::number(number);
        }
        if let Some(date) = parse_date(text) {
            return Cell::date(date);
        }

        Cell::new(CellValue::Text(text.to_string()), TypeTag::String)
    }
}

impl Default for CellTagger {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a finite number. `NaN` and `inf` stay text.
fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a date or date-time in one of the supported layouts.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDateTime> {
    if !DATE_SHAPE.is_match(text) {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
