//! Sample readers for delimited text and JSON cell dumps.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::SourceMetadata;
use super::tagger::{parse_date, CellTagger};
use crate::error::{Result, SheetscanError};
use crate::sample::{CellValue, Row, RowSample};
use crate::schema::TypeTag;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Workbook extensions that need a real spreadsheet parser.
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// Reader configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<char>,
    /// Quote character.
    pub quote: char,
    /// Trim whitespace around fields before tagging them.
    pub trim: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: '"',
            trim: true,
        }
    }
}

/// Reads the top of a file into a [`RowSample`].
pub struct SampleReader {
    config: ReaderConfig,
    max_rows: Option<usize>,
    tagger: CellTagger,
}

impl SampleReader {
    /// Create a new reader with default configuration.
    pub fn new() -> Self {
        Self::with_config(ReaderConfig::default())
    }

    /// Create a reader with custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        let tagger = CellTagger::new().with_trim(config.trim);
        Self {
            config,
            max_rows: None,
            tagger,
        }
    }

    /// Stop after `max_rows` rows (None = all).
    pub fn with_max_rows(mut self, max_rows: Option<usize>) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Read a file and return the sample and its metadata.
    ///
    /// `.json` files are read as arrays of rows of tagged cells; anything
    /// else is read as delimited text.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<(RowSample, SourceMetadata)> {
        let path = path.as_ref();

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            return Err(SheetscanError::UnsupportedFormat(format!(
                "'.{}' workbooks must be exported to CSV or JSON first",
                extension
            )));
        }

        let mut file = File::open(path).map_err(|e| SheetscanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| SheetscanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (sample, format) = if extension == "json" {
            (self.read_json(&contents)?, "json".to_string())
        } else {
            let delimiter = match self.config.delimiter {
                Some(d) => delimiter_byte(d)?,
                None => detect_delimiter(&contents, delimiter_byte(self.config.quote)?)?,
            };
            let format = match delimiter {
                b'\t' => "tsv",
                b',' => "csv",
                b';' => "csv-semicolon",
                b'|' => "psv",
                _ => "delimited",
            };
            (self.read_delimited(&contents, delimiter)?, format.to_string())
        };

        debug!(
            path = %path.display(),
            format = %format,
            rows = sample.len(),
            width = sample.width(),
            "read sample"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            sample.len(),
            sample.width(),
        );
        Ok((sample, metadata))
    }

    /// Read delimited text. Rows keep their own lengths; nothing is padded.
    pub fn read_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<RowSample> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(delimiter_byte(self.config.quote)?)
            .flexible(true)
            .from_reader(bytes);

        let mut rows: Vec<Row> = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            rows.push(record.iter().map(|field| self.tagger.tag(field)).collect());
        }

        if rows.is_empty() {
            return Err(SheetscanError::EmptyData("No rows found".to_string()));
        }

        Ok(RowSample::new(rows))
    }

    /// Read a JSON array of rows, each an array of `{value, data_type}`.
    ///
    /// String values stay text unless the cell is tagged as a date and the
    /// string parses as one.
    pub fn read_json(&self, bytes: &[u8]) -> Result<RowSample> {
        let mut sample: RowSample = serde_json::from_slice(bytes)?;
        if let Some(max) = self.max_rows {
            sample.truncate(max);
        }

        for cell in sample.rows_mut().iter_mut().flatten() {
            if cell.data_type != TypeTag::Date {
                continue;
            }
            let parsed = match &cell.value {
                CellValue::Text(text) => parse_date(text.trim()),
                _ => None,
            };
            if let Some(date) = parsed {
                cell.value = CellValue::Date(date);
            }
        }

        if sample.is_empty() {
            return Err(SheetscanError::EmptyData("No rows found".to_string()));
        }

        Ok(sample)
    }
}

impl Default for SampleReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a configured delimiter or quote character to a byte.
fn delimiter_byte(c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(SheetscanError::InvalidDelimiter(format!(
            "'{}' is not a single-byte character",
            c
        )))
    }
}

/// Detect the delimiter by analyzing the first few lines. Delimiters inside
/// `quote` characters are not counted.
fn detect_delimiter(bytes: &[u8], quote: u8) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(SheetscanError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim, quote))
            .collect();

        // Ragged sheets rarely agree on every line, so score by how many
        // lines use the delimiter and how often.
        let lines_with = counts.iter().filter(|&&c| c > 0).count();
        if lines_with == 0 {
            continue;
        }
        let max_count = counts.iter().copied().max().unwrap_or(0);
        let consistent = counts.iter().all(|&c| c == counts[0]);

        // Tab delimiter gets a slight bonus as it's less common in actual data
        let score = lines_with * 1000
            + max_count * 10
            + if consistent { 5 } else { 0 }
            + if delim == b'\t' { 1 } else { 0 };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    debug!(delimiter = %(best_delimiter as char).escape_default(), "detected delimiter");
    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8, quote: u8) -> usize {
    let delim_char = delimiter as char;
    let quote_char = quote as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            c if c == quote_char => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
