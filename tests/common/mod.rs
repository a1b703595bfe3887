//! Shared test utilities and fixture generators

#![allow(dead_code)]

use binmachine::pipeline::BinnedColumn;
use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small credit-risk style DataFrame
///
/// This DataFrame includes:
/// - `person_age`: Numeric, one missing value
/// - `person_income`: Numeric, wide spread
/// - `person_home_ownership`: Categorical
/// - `loan_grade`: Categorical, not configured in most tests
pub fn create_credit_dataframe() -> DataFrame {
    df! {
        "person_age" => [Some(22i64), Some(25), Some(31), None, Some(45), Some(52), Some(38), Some(29)],
        "person_income" => [5000.0f64, 9999.0, 15000.0, 25000.0, 35000.0, 42000.0, 9998.5, 30000.0],
        "person_home_ownership" => ["RENT", "OWN", "MORTGAGE", "RENT", "OTHER", "OWN", "RENT", "MORTGAGE"],
        "loan_grade" => ["A", "B", "C", "A", "D", "B", "A", "C"],
    }
    .unwrap()
}

/// Create a large random numeric column for stress tests
pub fn create_random_column(name: &str, rows: usize) -> Column {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let values: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>() * 1000.0).collect();
    Column::new(name.into(), values)
}

/// Labels of a binned column as owned strings
pub fn labels(binned: &BinnedColumn) -> Vec<Option<String>> {
    binned.label_values().unwrap()
}

/// Bin names in definition order
pub fn bin_names(binned: &BinnedColumn) -> Vec<String> {
    binned.bins.iter().map(|b| b.name.clone()).collect()
}

/// Count the rows carrying a given label
pub fn count_label(binned: &BinnedColumn, label: &str) -> usize {
    labels(binned)
        .iter()
        .filter(|l| l.as_deref() == Some(label))
        .count()
}

/// Write a text file into a fresh temporary directory
pub fn create_temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

/// Write a DataFrame as CSV into a temporary directory
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column present: '{}'",
            col
        );
    }
}
