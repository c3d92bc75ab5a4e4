//! Main Sheetscan struct and public API.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SheetscanError};
use crate::inference::{HeaderLocator, RowShapeAnalyzer, TypeClassifier, VotingMode};
use crate::input::{ReaderConfig, SampleReader, SourceMetadata};
use crate::sample::{column_views, Emptiness, RowSample};
use crate::schema::{ColumnSchema, SampleSchema, TypeWeights};

/// Configuration for header and type inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetscanConfig {
    /// How many cells narrower than the modal width a header row may be.
    pub tolerance: usize,
    /// Voting mode for column types.
    pub mode: VotingMode,
    /// Which cell values count as empty.
    pub emptiness: Emptiness,
    /// Guessing weight per type tag.
    pub weights: TypeWeights,
    /// Maximum rows to sample (None = all).
    pub max_rows: Option<usize>,
    /// Reader configuration.
    pub reader: ReaderConfig,
}

impl Default for SheetscanConfig {
    fn default() -> Self {
        Self {
            tolerance: 1,
            mode: VotingMode::Cumulative,
            emptiness: Emptiness::Falsy,
            weights: TypeWeights::DEFAULT,
            max_rows: None,
            reader: ReaderConfig::default(),
        }
    }
}

impl SheetscanConfig {
    /// Load a configuration from a JSON file. Missing fields take their
    /// defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| SheetscanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.max_rows == Some(0) {
            return Err(SheetscanError::Config(
                "max_rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of inferring the structure of a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Inferred header and column types.
    pub schema: SampleSchema,
}

/// The main inference engine.
pub struct Sheetscan {
    config: SheetscanConfig,
    reader: SampleReader,
    shape: RowShapeAnalyzer,
    locator: HeaderLocator,
    classifier: TypeClassifier,
}

impl Sheetscan {
    /// Create a Sheetscan instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(SheetscanConfig::default())
    }

    /// Create a Sheetscan instance with custom configuration.
    pub fn with_config(config: SheetscanConfig) -> Self {
        let reader = SampleReader::with_config(config.reader.clone()).with_max_rows(config.max_rows);
        let shape = RowShapeAnalyzer::new().with_emptiness(config.emptiness);
        let locator = HeaderLocator::new()
            .with_tolerance(config.tolerance)
            .with_emptiness(config.emptiness);
        let classifier = TypeClassifier::new()
            .with_mode(config.mode)
            .with_weights(config.weights)
            .with_emptiness(config.emptiness);

        Self {
            config,
            reader,
            shape,
            locator,
            classifier,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SheetscanConfig {
        &self.config
    }

    /// Read a file and infer its header and column types.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<InferenceResult> {
        let (sample, source) = self.reader.read_path(path)?;
        let schema = self.infer(&sample);
        Ok(InferenceResult { source, schema })
    }

    /// Infer the header and column types of an in-memory sample.
    ///
    /// The header row, when one is found, is left out of the type evidence.
    pub fn infer(&self, sample: &RowSample) -> SampleSchema {
        let rows = match self.config.max_rows {
            Some(max) if max < sample.len() => &sample.rows()[..max],
            _ => sample.rows(),
        };

        let modal_width = self.shape.modal_width(rows);
        let header = self.locator.locate_with_modal(rows, modal_width);
        let header_offset = header.data_offset();

        let header_row = header_offset.and_then(|offset| rows.get(offset));

        let columns: Vec<ColumnSchema> = column_views(rows)
            .iter()
            .map(|column| {
                let name = header_row
                    .and_then(|row| row.get(column.index()))
                    .filter(|cell| !self.config.emptiness.is_empty(&cell.value))
                    .map(|cell| cell.value.to_string());
                let tally = self.classifier.tally(column, header_offset);
                ColumnSchema::new(column.index(), name, tally)
            })
            .collect();

        debug!(
            rows = rows.len(),
            modal_width,
            header_found = header.is_found(),
            header_offset = header.offset,
            columns = columns.len(),
            "inferred sample schema"
        );

        SampleSchema {
            header,
            modal_width,
            columns,
        }
    }
}

impl Default for Sheetscan {
    fn default() -> Self {
        Self::new()
    }
}
