//! Integration tests for sheetscan.

use std::io::Write;
use tempfile::NamedTempFile;

use sheetscan::{
    column_count_modal, headers_guess, type_guess, Cell, CellValue, Emptiness, InferredType,
    RowSample, Sheetscan, SheetscanConfig, SheetscanError, TypeTag, VotingMode,
};

/// Helper to create a temporary file with given content and extension.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// A row with `populated` text cells followed by `blanks` empty ones.
fn row(populated: usize, blanks: usize) -> Vec<Cell> {
    let mut cells: Vec<Cell> = (0..populated).map(|i| Cell::text(format!("c{i}"))).collect();
    cells.extend((0..blanks).map(|_| Cell::empty()));
    cells
}

// =============================================================================
// Row Shape
// =============================================================================

#[test]
fn test_modal_counts_only_populated_cells() {
    let rows = vec![row(3, 2), row(3, 0), row(3, 5), row(2, 1), row(5, 0)];
    assert_eq!(column_count_modal(&rows), 3);
}

#[test]
fn test_modal_ignores_single_cell_rows() {
    let rows = vec![row(1, 0), row(1, 0), row(1, 0), row(0, 0), row(2, 0)];
    assert_eq!(column_count_modal(&rows), 2);
}

// =============================================================================
// Header Location
// =============================================================================

#[test]
fn test_header_tolerance_picks_first_close_row() {
    let rows = vec![row(1, 0), row(2, 0), row(3, 0), row(3, 0), row(3, 0)];
    let guess = headers_guess(&rows, 1);
    assert_eq!(guess.offset, 1);
    assert_eq!(guess.headers, vec!["c0", "c1"]);
}

#[test]
fn test_header_empty_sample() {
    let guess = headers_guess(&[], 1);
    assert_eq!(guess.offset, 0);
    assert!(guess.headers.is_empty());
    assert!(!guess.is_found());
}

#[test]
fn test_header_skips_empty_cells_in_names() {
    let rows = vec![
        vec![Cell::empty(), Cell::text("b"), Cell::empty(), Cell::text("d")],
        vec![Cell::number(1.0), Cell::number(2.0), Cell::number(3.0)],
        vec![Cell::number(4.0), Cell::number(5.0), Cell::number(6.0)],
    ];
    let guess = headers_guess(&rows, 1);
    assert_eq!(guess.offset, 0);
    assert_eq!(guess.headers, vec!["b", "d"]);
}

// =============================================================================
// Type Classification
// =============================================================================

#[test]
fn test_type_guess_empty() {
    assert!(type_guess(&[], false, None).is_empty());
}

#[test]
fn test_error_only_column_is_string() {
    let sample = RowSample::new(vec![
        vec![Cell::error("#DIV/0!"), Cell::number(1.0)],
        vec![Cell::empty(), Cell::number(2.0)],
        vec![Cell::error("#REF!"), Cell::number(3.0)],
    ]);
    let types = type_guess(&sample.columns(), false, None);
    assert_eq!(types, vec![InferredType::String, InferredType::Integer]);
}

#[test]
fn test_cumulative_versus_strict() {
    let sample = RowSample::new(vec![
        vec![Cell::number(1.0)],
        vec![Cell::number(2.0)],
        vec![Cell::text("three")],
    ]);
    let columns = sample.columns();

    // Numeric wins in both modes because its weight exceeds string's.
    assert_eq!(type_guess(&columns, false, None), vec![InferredType::Integer]);
    assert_eq!(type_guess(&columns, true, None), vec![InferredType::Integer]);

    let classifier = sheetscan::TypeClassifier::new();
    let cumulative = classifier.tally(&columns[0], None);
    let strict = classifier
        .clone()
        .with_mode(VotingMode::Strict)
        .tally(&columns[0], None);
    assert_eq!(cumulative.get(TypeTag::Numeric), Some(12));
    assert_eq!(strict.get(TypeTag::Numeric), Some(6));
    assert_eq!(cumulative.get(TypeTag::String), strict.get(TypeTag::String));
}

#[test]
fn test_header_exclusion() {
    let sample = RowSample::new(vec![
        vec![Cell::boolean(true)],
        vec![Cell::text("a")],
        vec![Cell::text("b")],
    ]);
    let columns = sample.columns();
    assert_eq!(type_guess(&columns, true, None), vec![InferredType::Boolean]);
    assert_eq!(type_guess(&columns, true, Some(0)), vec![InferredType::String]);
}

#[test]
fn test_numeric_unification() {
    let sample = RowSample::new(vec![
        vec![Cell::number(1.0)],
        vec![Cell::number(2.5)],
        vec![Cell::number(1e-3)],
    ]);
    assert_eq!(
        type_guess(&sample.columns(), false, None),
        vec![InferredType::Integer]
    );
}

// =============================================================================
// End-to-end Pipeline
// =============================================================================

#[test]
fn test_analyze_csv_with_title_rows() {
    let content = "Quarterly sales report\n\
                   Generated 2024-02-01\n\
                   ,region,units,shipped,closed\n\
                   q1,north,10,true,2024-03-31\n\
                   q2,north,12,true,2024-06-30\n\
                   q3,south,#N/A,true,2024-09-30\n\
                   q4,south,14,true,2024-12-31\n";
    let file = create_test_file(content, ".csv");

    let result = Sheetscan::new()
        .analyze(file.path())
        .expect("Analysis failed");

    assert_eq!(result.source.format, "csv");
    assert_eq!(result.source.row_count, 7);
    assert!(result.source.hash.starts_with("sha256:"));

    let schema = result.schema;
    assert_eq!(schema.modal_width, 5);
    assert_eq!(schema.header.offset, 2);
    assert_eq!(schema.header.headers, vec!["region", "units", "shipped", "closed"]);
    assert_eq!(schema.first_data_row(), 3);
    assert_eq!(
        schema.column_types(),
        vec![
            InferredType::String,
            InferredType::String,
            InferredType::Integer,
            InferredType::Boolean,
            InferredType::Date,
        ]
    );
    assert_eq!(schema.columns[0].name, None);
    assert_eq!(schema.columns[4].display_name(), "closed");
}

#[test]
fn test_analyze_tsv_auto_detect() {
    let content = "id\tscore\n1\t0.5\n2\t0.75\n";
    let file = create_test_file(content, ".tsv");

    let result = Sheetscan::new()
        .analyze(file.path())
        .expect("Analysis failed");

    assert_eq!(result.source.format, "tsv");
    assert_eq!(result.schema.header.headers, vec!["id", "score"]);
    assert_eq!(
        result.schema.column_types(),
        vec![InferredType::Integer, InferredType::Integer]
    );
}

#[test]
fn test_analyze_json_cells() {
    let content = r#"[
        [{"value": "name", "data_type": "s"}, {"value": "born", "data_type": "s"}],
        [{"value": "Ada", "data_type": "s"}, {"value": "1815-12-10T00:00:00", "data_type": "d"}],
        [{"value": "Alan", "data_type": "s"}, {"value": "1912-06-23T00:00:00", "data_type": "d"}]
    ]"#;
    let file = create_test_file(content, ".json");

    let result = Sheetscan::new()
        .analyze(file.path())
        .expect("Analysis failed");

    assert_eq!(result.source.format, "json");
    assert!(matches!(
        result.schema.columns[1].tally.iter().next(),
        Some((TypeTag::Date, 6))
    ));
    assert_eq!(
        result.schema.column_types(),
        vec![InferredType::String, InferredType::Date]
    );
}

#[test]
fn test_zero_values_with_absent_policy() {
    let sample = RowSample::new(vec![
        vec![Cell::text("id"), Cell::text("count")],
        vec![Cell::text("a"), Cell::number(0.0)],
        vec![Cell::text("b"), Cell::number(0.0)],
        vec![Cell::text("c"), Cell::new(CellValue::Text("none".into()), TypeTag::String)],
    ]);

    let falsy = Sheetscan::new().infer(&sample);
    assert_eq!(falsy.column_types()[1], InferredType::String);

    let config = SheetscanConfig {
        emptiness: Emptiness::Absent,
        ..SheetscanConfig::default()
    };
    let absent = Sheetscan::with_config(config).infer(&sample);
    assert_eq!(absent.column_types()[1], InferredType::Integer);
}

#[test]
fn test_workbook_rejected() {
    let file = create_test_file("not really a workbook", ".xlsx");
    let err = Sheetscan::new().analyze(file.path()).unwrap_err();
    assert!(matches!(err, SheetscanError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_file() {
    let err = Sheetscan::new()
        .analyze("/nonexistent/sample.csv")
        .unwrap_err();
    assert!(matches!(err, SheetscanError::Io { .. }));
}

#[test]
fn test_schema_serializes() {
    let sample = RowSample::new(vec![
        vec![Cell::text("a"), Cell::text("b")],
        vec![Cell::number(1.0), Cell::boolean(true)],
    ]);
    let schema = Sheetscan::new().infer(&sample);
    let json = serde_json::to_value(&schema).expect("serialize");

    assert_eq!(json["header"]["offset"], 0);
    assert_eq!(json["columns"][0]["inferred_type"], "integer");
    assert_eq!(json["columns"][1]["tally"]["boolean"], 7);
}
