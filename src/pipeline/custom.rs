//! Custom binning with caller-supplied bins, and the no-binning passthrough
//!
//! Bins are scanned in the order they were declared and the first match
//! wins. Values that match no bin get a null label.

use std::collections::HashSet;

use polars::prelude::*;

use super::column::{column_name, read_numeric, read_strings, require_rows, BinnedColumn, NumericInput};
use super::decimal::add_exact;
use super::error::{BinningError, Result};
use super::ranges::NumericRange;
use super::settings::{Bin, ColumnType};

/// Label each value with the first bin having a range that contains it
pub fn assign_numeric(values: &[Option<f64>], bins: &[Bin]) -> Vec<Option<String>> {
    values
        .iter()
        .map(|value| {
            let value = (*value)?;
            bins.iter()
                .find(|bin| {
                    bin.ranges()
                        .is_some_and(|ranges| ranges.iter().any(|r| r.contains(value)))
                })
                .map(|bin| bin.name.clone())
        })
        .collect()
}

/// Label each value with the first bin listing it
pub fn assign_categorical(values: &[Option<String>], bins: &[Bin]) -> Vec<Option<String>> {
    values
        .iter()
        .map(|value| {
            let value = value.as_ref()?;
            bins.iter()
                .find(|bin| bin.elements().is_some_and(|elements| elements.contains(value)))
                .map(|bin| bin.name.clone())
        })
        .collect()
}

/// Apply range-based bins to a numeric column
pub fn apply_numeric_bins(column: &Column, bins: &[Bin]) -> Result<BinnedColumn> {
    if let Some(bin) = bins.iter().find(|bin| bin.ranges().is_none()) {
        return Err(BinningError::InvalidSettings(format!(
            "bin '{}' lists elements but column '{}' is numerical",
            bin.name,
            column_name(column)
        )));
    }

    let values = match read_numeric(column)? {
        NumericInput::AllMissing => vec![None; column.len()],
        NumericInput::Values(values) => values,
    };

    let labels = assign_numeric(&values, bins);
    Ok(BinnedColumn::from_labels(column_name(column), bins.to_vec(), labels))
}

/// Apply element-based bins to a categorical column
pub fn apply_categorical_bins(column: &Column, bins: &[Bin]) -> Result<BinnedColumn> {
    if let Some(bin) = bins.iter().find(|bin| bin.elements().is_none()) {
        return Err(BinningError::InvalidSettings(format!(
            "bin '{}' lists ranges but column '{}' is categorical",
            bin.name,
            column_name(column)
        )));
    }

    require_rows(column)?;
    let values = read_strings(column)?;
    let labels = assign_categorical(&values, bins);
    Ok(BinnedColumn::from_labels(column_name(column), bins.to_vec(), labels))
}

/// Leave values as they are, but still describe one bin per distinct value:
/// `[v, v + 1)` for numerical columns and `[v]` for categorical ones.
pub fn passthrough(column: &Column, column_type: ColumnType) -> Result<BinnedColumn> {
    let bins = match column_type {
        ColumnType::Numerical => {
            let values = match read_numeric(column)? {
                NumericInput::AllMissing => Vec::new(),
                NumericInput::Values(values) => values,
            };
            let mut seen = HashSet::new();
            let mut bins = Vec::new();
            // -0.0 and 0.0 are the same value
            for value in values.into_iter().flatten().map(|v| v + 0.0) {
                if !seen.insert(value.to_bits()) {
                    continue;
                }
                // plain float step outside the decimal range; no bin when it cannot move
                let high = add_exact(value, 1.0).unwrap_or(value + 1.0);
                if let Ok(range) = NumericRange::new(value, high) {
                    bins.push(Bin::from_ranges(vec![range]));
                }
            }
            bins
        }
        ColumnType::Categorical => {
            require_rows(column)?;
            let mut seen = HashSet::new();
            read_strings(column)?
                .into_iter()
                .flatten()
                .filter(|value| seen.insert(value.clone()))
                .map(|value| Bin::from_elements(vec![value]))
                .collect()
        }
    };

    Ok(BinnedColumn {
        bins,
        labels: column.clone(),
    })
}
