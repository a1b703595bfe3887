//! Tests for the column and whole-table dispatcher

use binmachine::pipeline::{
    bin_column, bin_dataframe, bin_dataframe_with_progress, parse_settings, AutoBinning, BinSpec,
    BinningAlgo, BinningError, BinningMethod, ColumnBinSettings, ColumnType,
};
use indicatif::ProgressBar;
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::{assert_has_columns, assert_missing_columns, labels};

fn auto(algo: BinningAlgo, method: BinningMethod, value: f64) -> BinSpec {
    BinSpec::Auto(AutoBinning { algo, method, value })
}

#[test]
fn test_dispatch_each_auto_strategy() {
    let values: Vec<f64> = (0..=100).map(f64::from).collect();
    let col = Column::new("score".into(), values);

    let cases = [
        (auto(BinningAlgo::EqualWidth, BinningMethod::Width, 25.0), 5),
        (auto(BinningAlgo::EqualWidth, BinningMethod::NumBins, 4.0), 4),
        (auto(BinningAlgo::EqualWidth, BinningMethod::Freq, 4.0), 4),
        (auto(BinningAlgo::EqualFrequency, BinningMethod::Freq, 101.0), 1),
        (auto(BinningAlgo::EqualFrequency, BinningMethod::NumBins, 4.0), 4),
        (auto(BinningAlgo::EqualFrequency, BinningMethod::Width, 4.0), 4),
    ];

    for (spec, expected_bins) in cases {
        let settings = ColumnBinSettings::new("score", ColumnType::Numerical, spec.clone());
        let binned = bin_column(&col, &settings).unwrap();
        assert_eq!(binned.bins.len(), expected_bins, "Unexpected bin count for {}", spec);
        assert_eq!(binned.unassigned(), 0);
    }
}

#[test]
fn test_fractional_count_rejected() {
    let col = Column::new("score".into(), [1.0f64, 2.0, 3.0]);
    let settings = ColumnBinSettings::new(
        "score",
        ColumnType::Numerical,
        auto(BinningAlgo::EqualFrequency, BinningMethod::NumBins, 2.5),
    );
    assert!(matches!(
        bin_column(&col, &settings),
        Err(BinningError::InvalidParameter(_))
    ));
}

#[test]
fn test_auto_binning_categorical_rejected() {
    let df = common::create_credit_dataframe();
    let settings = ColumnBinSettings::new(
        "loan_grade",
        ColumnType::Categorical,
        auto(BinningAlgo::EqualFrequency, BinningMethod::NumBins, 2.0),
    );
    let result = bin_column(df.column("loan_grade").unwrap(), &settings);
    assert!(matches!(result, Err(BinningError::InvalidSettings(_))));
}

#[test]
fn test_whole_table_adds_only_configured_fields() {
    let df = common::create_credit_dataframe();
    let settings = parse_settings(
        r#"[{"column": "person_income", "type": "numerical",
             "bins": [{"name": "low", "ranges": [[0, 9999]]},
                      {"name": "high", "ranges": [[9999, 50000]]}]}]"#,
    )
    .unwrap();

    let binned = bin_dataframe(&df, &settings).unwrap();

    assert_eq!(binned.width(), df.width() + 1);
    assert_has_columns(&binned, &["person_income_binned"]);
    assert_missing_columns(&binned, &["person_age_binned", "loan_grade_binned"]);
    assert!(binned.column("loan_grade").unwrap().as_materialized_series().equals_missing(
        df.column("loan_grade").unwrap().as_materialized_series()
    ));
    assert_eq!(df.width(), 4, "Input table is left untouched");

    let income = binned.column("person_income_binned").unwrap();
    let values: Vec<Option<&str>> = income.as_materialized_series().str().unwrap().into_iter().collect();
    assert_eq!(values[0], Some("low"));
    assert_eq!(values[1], Some("high"));
    assert_eq!(values[6], Some("low"));
}

#[test]
fn test_whole_table_mixed_settings() {
    let df = common::create_credit_dataframe();
    let settings = parse_settings(
        r#"[{"column": "person_age", "type": "numerical",
             "bins": {"algo": "equal width", "method": "width", "value": 10}},
            {"column": "person_home_ownership", "type": "categorical",
             "bins": [{"name": "renters", "elements": ["RENT"]},
                      {"name": "owners", "elements": ["OWN", "MORTGAGE"]}]},
            {"column": "loan_grade", "type": "categorical", "bins": "none"},
            {"column": "not_in_table", "type": "numerical", "bins": "none"}]"#,
    )
    .unwrap();

    let pb = ProgressBar::hidden();
    let (binned, outcomes) = bin_dataframe_with_progress(&df, &settings, &pb).unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(pb.position(), 3);
    assert_has_columns(
        &binned,
        &["person_age_binned", "person_home_ownership_binned", "loan_grade_binned"],
    );

    let age = outcomes.iter().find(|o| o.column == "person_age").unwrap();
    assert_eq!(age.unassigned, 1, "The missing age stays unbinned");
    assert_eq!(age.bin_count, 4);

    let home = outcomes.iter().find(|o| o.column == "person_home_ownership").unwrap();
    assert_eq!(home.unassigned, 1, "OTHER matches no bin");

    let grade = binned.column("loan_grade_binned").unwrap();
    assert_eq!(grade.dtype(), df.column("loan_grade").unwrap().dtype());
}

#[test]
fn test_whole_table_failure_aborts() {
    let df = common::create_credit_dataframe();
    let settings = vec![ColumnBinSettings::new(
        "loan_grade",
        ColumnType::Numerical,
        auto(BinningAlgo::EqualWidth, BinningMethod::Width, 1.0),
    )];
    assert!(matches!(
        bin_dataframe(&df, &settings),
        Err(BinningError::WrongType { .. })
    ));
}

#[test]
fn test_whole_table_empty_returned_unchanged() {
    let df = df! {
        "person_age" => Vec::<f64>::new(),
    }
    .unwrap();
    let settings = vec![ColumnBinSettings::new("person_age", ColumnType::Numerical, BinSpec::NoBinning)];

    let binned = bin_dataframe(&df, &settings).unwrap();
    assert_eq!(binned.width(), 1);
}

#[test]
fn test_reapplied_auto_bins_through_settings() {
    let df = common::create_credit_dataframe();
    let col = df.column("person_income").unwrap();
    let settings = ColumnBinSettings::new(
        "person_income",
        ColumnType::Numerical,
        auto(BinningAlgo::EqualFrequency, BinningMethod::NumBins, 3.0),
    );
    let first = bin_column(col, &settings).unwrap();

    let reuse = ColumnBinSettings::new(
        "person_income",
        ColumnType::Numerical,
        BinSpec::Custom(first.bins.clone()),
    );
    let second = bin_column(col, &reuse).unwrap();
    assert_eq!(labels(&first), labels(&second));
}
