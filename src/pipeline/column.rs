//! Column access shared by every binning path, and the binned result type

use polars::prelude::*;

use super::error::{BinningError, Result};
use super::settings::Bin;

/// Bin assignments for one column
#[derive(Debug, Clone)]
pub struct BinnedColumn {
    /// Bin definitions the assignment used, reusable as custom bins
    pub bins: Vec<Bin>,
    /// One entry per input row; null where the row fell in no bin
    pub labels: Column,
}

impl BinnedColumn {
    /// Result for a column whose values are all missing
    pub fn all_missing(name: &str, len: usize) -> Self {
        let labels: Vec<Option<String>> = vec![None; len];
        Self {
            bins: Vec::new(),
            labels: Column::new(name.into(), labels),
        }
    }

    pub(crate) fn from_labels(name: &str, bins: Vec<Bin>, labels: Vec<Option<String>>) -> Self {
        Self {
            bins,
            labels: Column::new(name.into(), labels),
        }
    }

    /// Number of rows that received no bin
    pub fn unassigned(&self) -> usize {
        self.labels.null_count()
    }

    /// Labels as strings (the passthrough keeps raw values, which are cast)
    pub fn label_values(&self) -> Result<Vec<Option<String>>> {
        read_strings(&self.labels)
    }
}

/// Numeric column contents after the shared precondition checks
pub(crate) enum NumericInput {
    /// Every row is null or NaN
    AllMissing,
    /// Values in row order, NaN folded into `None`
    Values(Vec<Option<f64>>),
}

pub(crate) fn column_name(column: &Column) -> &str {
    column.name().as_str()
}

pub(crate) fn require_rows(column: &Column) -> Result<()> {
    if column.len() == 0 {
        return Err(BinningError::EmptyInput(column_name(column).to_string()));
    }
    Ok(())
}

/// Read a numeric column: empty, then all-missing, then dtype are checked in that order
pub(crate) fn read_numeric(column: &Column) -> Result<NumericInput> {
    require_rows(column)?;

    if column.null_count() == column.len() {
        return Ok(NumericInput::AllMissing);
    }

    let dtype = column.dtype();
    if !(dtype.is_primitive_numeric() || dtype.is_decimal()) {
        return Err(BinningError::wrong_type(
            column_name(column),
            "numeric",
            column.dtype(),
        ));
    }

    let float_col = column.cast(&DataType::Float64)?;
    let values: Vec<Option<f64>> = float_col
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();

    if values.iter().all(Option::is_none) {
        return Ok(NumericInput::AllMissing);
    }

    Ok(NumericInput::Values(values))
}

/// Read any column as strings
pub(crate) fn read_strings(column: &Column) -> Result<Vec<Option<String>>> {
    let string_col = column.cast(&DataType::String)?;
    let values = string_col
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(values)
}

/// Smallest and largest present value
pub(crate) fn min_max(values: &[Option<f64>]) -> Option<(f64, f64)> {
    values.iter().flatten().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
