//! Weighted vote-based column type classification.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::sample::{ColumnView, Emptiness};
use crate::schema::{InferredType, TypeTag, TypeWeights};

/// How cell tags turn into votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingMode {
    /// Every cell adds its tag's weight, so frequent tags dominate.
    Cumulative,
    /// Each distinct tag counts once, so only presence matters.
    Strict,
}

impl Default for VotingMode {
    fn default() -> Self {
        VotingMode::Cumulative
    }
}

/// Accumulated weight per tag for one column, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTally {
    weights: IndexMap<TypeTag, u32>,
}

impl TypeTally {
    /// The tally given to a column with no usable cells.
    pub fn fallback() -> Self {
        let mut weights = IndexMap::new();
        weights.insert(TypeTag::String, 0);
        Self { weights }
    }

    /// Weight accumulated by `tag`, if it was seen.
    pub fn get(&self, tag: TypeTag) -> Option<u32> {
        self.weights.get(&tag).copied()
    }

    /// Iterate `(tag, weight)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeTag, u32)> + '_ {
        self.weights.iter().map(|(t, w)| (*t, *w))
    }

    /// Number of distinct tags in the tally.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if no tag has been recorded.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The tag with the most weight. Equal weights go to the tag with the
    /// higher [`TypeTag::priority`]; an empty tally yields `String`.
    pub fn winner(&self) -> TypeTag {
        self.iter()
            .max_by_key(|(tag, weight)| (*weight, tag.priority()))
            .map(|(tag, _)| tag)
            .unwrap_or(TypeTag::String)
    }

    /// The externally visible type of the winning tag.
    pub fn inferred_type(&self) -> InferredType {
        InferredType::from(self.winner())
    }
}

/// Decides one primitive type per column from per-cell tags.
#[derive(Debug, Clone, Default)]
pub struct TypeClassifier {
    mode: VotingMode,
    weights: TypeWeights,
    emptiness: Emptiness,
}

impl TypeClassifier {
    /// Create a cumulative classifier with the default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the voting mode.
    pub fn with_mode(mut self, mode: VotingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the weight table.
    pub fn with_weights(mut self, weights: TypeWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Use a different rule for which cells count as empty.
    pub fn with_emptiness(mut self, emptiness: Emptiness) -> Self {
        self.emptiness = emptiness;
        self
    }

    /// The voting mode in use.
    pub fn mode(&self) -> VotingMode {
        self.mode
    }

    /// Classify every column, preserving column order.
    ///
    /// The cell that came from row `header_offset` is not counted as
    /// evidence.
    pub fn classify(
        &self,
        columns: &[ColumnView<'_>],
        header_offset: Option<usize>,
    ) -> Vec<InferredType> {
        columns
            .iter()
            .map(|column| self.classify_column(column, header_offset))
            .collect()
    }

    /// Classify columns on the rayon pool. Gives the same result as
    /// [`TypeClassifier::classify`].
    #[cfg(feature = "parallel")]
    pub fn classify_par(
        &self,
        columns: &[ColumnView<'_>],
        header_offset: Option<usize>,
    ) -> Vec<InferredType> {
        use rayon::prelude::*;

        columns
            .par_iter()
            .map(|column| self.classify_column(column, header_offset))
            .collect()
    }

    /// Classify a single column.
    pub fn classify_column(
        &self,
        column: &ColumnView<'_>,
        header_offset: Option<usize>,
    ) -> InferredType {
        let tally = self.tally(column, header_offset);
        let inferred = tally.inferred_type();
        trace!(column = column.index(), ?tally, %inferred, "classified column");
        inferred
    }

    /// Count the weighted votes of a column.
    pub fn tally(&self, column: &ColumnView<'_>, header_offset: Option<usize>) -> TypeTally {
        let evidence = column
            .iter()
            .filter(|&(row, _)| Some(row) != header_offset)
            .map(|(_, cell)| cell)
            .filter(|cell| !self.emptiness.is_empty(&cell.value))
            .filter(|cell| cell.data_type != TypeTag::Error)
            .map(|cell| cell.data_type);

        let mut weights: IndexMap<TypeTag, u32> = IndexMap::new();
        match self.mode {
            VotingMode::Cumulative => {
                for tag in evidence {
                    *weights.entry(tag).or_insert(0) += self.weights.weight(tag);
                }
            }
            VotingMode::Strict => {
                let present: IndexSet<TypeTag> = evidence.collect();
                for tag in present {
                    weights.insert(tag, self.weights.weight(tag));
                }
            }
        }

        if weights.is_empty() {
            return TypeTally::fallback();
        }
        TypeTally { weights }
    }
}

/// Guess a type for each column.
///
/// `strict` selects [`VotingMode::Strict`]; otherwise votes accumulate.
/// `header_offset` names the header row to leave out of the evidence.
pub fn type_guess(
    columns: &[ColumnView<'_>],
    strict: bool,
    header_offset: Option<usize>,
) -> Vec<InferredType> {
    let mode = if strict {
        VotingMode::Strict
    } else {
        VotingMode::Cumulative
    };
    TypeClassifier::new()
        .with_mode(mode)
        .classify(columns, header_offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{Cell, CellValue};

    fn column(cells: &[Cell]) -> ColumnView<'_> {
        ColumnView::from_cells(0, cells)
    }

    #[test]
    fn test_empty_input() {
        assert!(type_guess(&[], false, None).is_empty());
        assert!(type_guess(&[], true, Some(0)).is_empty());
    }

    #[test]
    fn test_empty_and_error_column_falls_back() {
        let cells = vec![
            Cell::empty(),
            Cell::error("#DIV/0!"),
            Cell::text(""),
            Cell::error("#N/A"),
        ];
        let col = column(&cells);
        let classifier = TypeClassifier::new();
        assert_eq!(classifier.tally(&col, None), TypeTally::fallback());
        assert_eq!(type_guess(&[col.clone()], false, None), vec![InferredType::String]);
        assert_eq!(type_guess(&[col], true, None), vec![InferredType::String]);
    }

    #[test]
    fn test_cumulative_accumulates() {
        let cells = vec![Cell::number(1.0), Cell::number(2.0), Cell::text("n/a")];
        let tally = TypeClassifier::new().tally(&column(&cells), None);
        assert_eq!(tally.get(TypeTag::Numeric), Some(12));
        assert_eq!(tally.get(TypeTag::String), Some(1));
        assert_eq!(tally.inferred_type(), InferredType::Integer);
    }

    #[test]
    fn test_strict_counts_presence_once() {
        let cells = vec![
            Cell::number(1.0),
            Cell::number(2.0),
            Cell::number(3.0),
            Cell::text("x"),
        ];
        let tally = TypeClassifier::new()
            .with_mode(VotingMode::Strict)
            .tally(&column(&cells), None);
        assert_eq!(tally.get(TypeTag::Numeric), Some(6));
        assert_eq!(tally.get(TypeTag::String), Some(1));
    }

    #[test]
    fn test_volume_wins_only_in_cumulative_mode() {
        // Eight text cells outweigh one boolean cumulatively, but a boolean
        // outranks text when only presence counts.
        let mut cells: Vec<Cell> = (0..8).map(|i| Cell::text(format!("s{i}"))).collect();
        cells.push(Cell::boolean(true));
        let col = column(&cells);
        assert_eq!(type_guess(&[col.clone()], false, None), vec![InferredType::String]);
        assert_eq!(type_guess(&[col], true, None), vec![InferredType::Boolean]);
    }

    #[test]
    fn test_header_offset_excluded() {
        // Without the header skip the boolean in row 0 would win.
        let cells = vec![Cell::boolean(true), Cell::text("a"), Cell::text("b")];
        let col = column(&cells);
        assert_eq!(type_guess(&[col.clone()], true, None), vec![InferredType::Boolean]);
        assert_eq!(type_guess(&[col], true, Some(0)), vec![InferredType::String]);
    }

    #[test]
    fn test_header_offset_uses_row_index() {
        let rows = crate::sample::RowSample::new(vec![
            vec![Cell::text("id")],
            vec![],
            vec![Cell::text("name"), Cell::boolean(true)],
            vec![Cell::number(1.0), Cell::text("x")],
        ]);
        let columns = rows.columns();
        // Column 1 has cells only in rows 2 and 3; skipping row 2 drops the
        // boolean, not the text in row 3.
        let types = TypeClassifier::new()
            .with_mode(VotingMode::Strict)
            .classify(&columns, Some(2));
        assert_eq!(types[1], InferredType::String);
    }

    #[test]
    fn test_numeric_unification() {
        let cells = vec![Cell::number(1.0), Cell::number(2.75), Cell::number(-3.5)];
        assert_eq!(type_guess(&[column(&cells)], false, None), vec![InferredType::Integer]);
    }

    #[test]
    fn test_tie_prefers_specific_type() {
        // Six string votes tie with one numeric vote.
        let mut cells: Vec<Cell> = (0..6).map(|i| Cell::text(format!("s{i}"))).collect();
        cells.push(Cell::number(5.0));
        let tally = TypeClassifier::new().tally(&column(&cells), None);
        assert_eq!(tally.get(TypeTag::String), tally.get(TypeTag::Numeric));
        assert_eq!(tally.winner(), TypeTag::Numeric);

        // Two dates tie with one number; date outranks numeric.
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 5)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        let cells = vec![Cell::date(date), Cell::date(date), Cell::number(1.0)];
        assert_eq!(type_guess(&[column(&cells)], false, None), vec![InferredType::Date]);
    }

    #[test]
    fn test_unknown_tag_maps_to_string() {
        let cells = vec![Cell::new(CellValue::Text("=SUM(A1:A3)".into()), TypeTag::Unknown)];
        let tally = TypeClassifier::new().tally(&column(&cells), None);
        assert_eq!(tally.get(TypeTag::Unknown), Some(0));
        assert_eq!(tally.inferred_type(), InferredType::String);
    }

    #[test]
    fn test_zero_values_depend_on_emptiness() {
        let cells = vec![Cell::number(0.0), Cell::number(0.0), Cell::text("x")];
        let col = column(&cells);
        assert_eq!(TypeClassifier::new().classify_column(&col, None), InferredType::String);
        let absent = TypeClassifier::new().with_emptiness(Emptiness::Absent);
        assert_eq!(absent.classify_column(&col, None), InferredType::Integer);
    }

    #[test]
    fn test_custom_weights() {
        let weights = TypeWeights {
            string: 10,
            ..TypeWeights::DEFAULT
        };
        let cells = vec![Cell::number(1.0), Cell::text("x")];
        let classifier = TypeClassifier::new()
            .with_mode(VotingMode::Strict)
            .with_weights(weights);
        assert_eq!(classifier.classify_column(&column(&cells), None), InferredType::String);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let rows = crate::sample::RowSample::new(vec![
            vec![Cell::text("a"), Cell::text("b"), Cell::text("c")],
            vec![Cell::number(1.0), Cell::boolean(true), Cell::text("x")],
            vec![Cell::number(2.0), Cell::boolean(false), Cell::number(3.0)],
        ]);
        let columns = rows.columns();
        let classifier = TypeClassifier::new();
        assert_eq!(
            classifier.classify(&columns, Some(0)),
            classifier.classify_par(&columns, Some(0))
        );
    }
}
