//! Resolve a column's settings to a binning path and apply it to one column
//! or to every configured column of a table.

use indicatif::ProgressBar;
use polars::prelude::*;
use serde::Serialize;

use super::column::{column_name, BinnedColumn};
use super::custom::{apply_categorical_bins, apply_numeric_bins, passthrough};
use super::error::{BinningError, Result};
use super::settings::{find_settings, AutoBinning, BinSpec, BinningAlgo, BinningMethod, ColumnBinSettings, ColumnType};
use super::strategies::{
    equal_frequency_by_count, equal_frequency_by_freq, equal_width_by_count, equal_width_by_width,
};

/// Suffix of the field holding a column's bin labels
pub const BINNED_SUFFIX: &str = "_binned";

/// What happened to one configured column during a whole-table run
#[derive(Debug, Clone, Serialize)]
pub struct BinningOutcome {
    pub column: String,
    pub output_column: String,
    /// Human-readable description of the settings applied
    pub strategy: String,
    pub bin_count: usize,
    /// Rows that received no bin (including missing values)
    pub unassigned: usize,
}

/// Name of the output field for `column`
pub fn binned_column_name(column: &str) -> String {
    format!("{}{}", column, BINNED_SUFFIX)
}

/// Bin a single column according to its settings
pub fn bin_column(column: &Column, settings: &ColumnBinSettings) -> Result<BinnedColumn> {
    if column_name(column) != settings.column {
        return Err(BinningError::InvalidSettings(format!(
            "settings for column '{}' applied to column '{}'",
            settings.column,
            column_name(column)
        )));
    }

    match &settings.bins {
        BinSpec::NoBinning => passthrough(column, settings.column_type),
        BinSpec::Auto(auto) => match settings.column_type {
            ColumnType::Numerical => apply_auto(column, auto),
            ColumnType::Categorical => Err(BinningError::InvalidSettings(format!(
                "auto binning ({}) is only supported for numerical columns, '{}' is categorical",
                auto.algo, settings.column
            ))),
        },
        BinSpec::Custom(bins) => match settings.column_type {
            ColumnType::Numerical => apply_numeric_bins(column, bins),
            ColumnType::Categorical => apply_categorical_bins(column, bins),
        },
    }
}

fn apply_auto(column: &Column, auto: &AutoBinning) -> Result<BinnedColumn> {
    match (auto.algo, auto.method) {
        (BinningAlgo::EqualWidth, BinningMethod::Width) => equal_width_by_width(column, auto.value),
        (BinningAlgo::EqualWidth, _) => {
            equal_width_by_count(column, whole_number(auto.value, "number of bins")?)
        }
        (BinningAlgo::EqualFrequency, BinningMethod::Freq) => {
            equal_frequency_by_freq(column, whole_number(auto.value, "rows per bin")?)
        }
        (BinningAlgo::EqualFrequency, _) => {
            equal_frequency_by_count(column, whole_number(auto.value, "number of bins")?)
        }
    }
}

/// Accept only positive whole numbers for counts
fn whole_number(value: f64, what: &str) -> Result<usize> {
    if !value.is_finite() || value <= 0.0 || value.fract() != 0.0 || value > usize::MAX as f64 {
        return Err(BinningError::InvalidParameter(format!(
            "{} must be a positive whole number, got {}",
            what, value
        )));
    }
    Ok(value as usize)
}

/// Bin every configured column of `df`, returning a new table with one
/// `<column>_binned` field per configured column. Unconfigured columns pass
/// through untouched.
pub fn bin_dataframe(df: &DataFrame, settings: &[ColumnBinSettings]) -> Result<DataFrame> {
    let (binned, _) = bin_dataframe_with_progress(df, settings, &ProgressBar::hidden())?;
    Ok(binned)
}

/// [`bin_dataframe`] with a progress bar ticked once per configured column.
///
/// Columns are processed in table order; the first failure aborts the run.
pub fn bin_dataframe_with_progress(
    df: &DataFrame,
    settings: &[ColumnBinSettings],
    pb: &ProgressBar,
) -> Result<(DataFrame, Vec<BinningOutcome>)> {
    let mut output = df.clone();
    let mut outcomes = Vec::new();

    if df.height() == 0 {
        return Ok((output, outcomes));
    }

    for column in df.get_columns() {
        let Some(col_settings) = find_settings(settings, column_name(column)) else {
            continue;
        };
        pb.set_message(col_settings.column.clone());

        let binned = bin_column(column, col_settings)?;
        let output_column = binned_column_name(&col_settings.column);

        outcomes.push(BinningOutcome {
            column: col_settings.column.clone(),
            output_column: output_column.clone(),
            strategy: col_settings.bins.to_string(),
            bin_count: binned.bins.len(),
            unassigned: binned.unassigned(),
        });

        output.with_column(binned.labels.with_name(output_column.into()))?;
        pb.inc(1);
    }

    Ok((output, outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_number() {
        assert_eq!(whole_number(4.0, "bins").unwrap(), 4);
        assert!(whole_number(0.0, "bins").is_err());
        assert!(whole_number(2.5, "bins").is_err());
        assert!(whole_number(-3.0, "bins").is_err());
        assert!(whole_number(f64::INFINITY, "bins").is_err());
    }

    #[test]
    fn test_column_name_mismatch() {
        let col = Column::new("age".into(), [1.0f64]);
        let settings = ColumnBinSettings::new("income", ColumnType::Numerical, BinSpec::NoBinning);
        assert!(matches!(
            bin_column(&col, &settings),
            Err(BinningError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_auto_binning_on_categorical_rejected() {
        let col = Column::new("grade".into(), ["A", "B"]);
        let auto = AutoBinning {
            algo: BinningAlgo::EqualWidth,
            method: BinningMethod::Width,
            value: 1.0,
        };
        let settings = ColumnBinSettings::new("grade", ColumnType::Categorical, BinSpec::Auto(auto));
        assert!(matches!(
            bin_column(&col, &settings),
            Err(BinningError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_binned_column_name() {
        assert_eq!(binned_column_name("person_age"), "person_age_binned");
    }
}
