//! Automatic binning strategies for numeric columns
//!
//! Four algorithms turn a numeric column into half-open bins:
//! - equal width, given the width
//! - equal width, given the number of bins
//! - equal frequency, given the target rows per bin
//! - equal frequency, given the number of bins
//!
//! Every strategy returns the bins it produced next to the per-row labels, so
//! the same cut points can be reapplied later through the custom-binning path.
//! Edges are accumulated with decimal arithmetic (see [`super::decimal`]).

use polars::prelude::*;

use super::column::{column_name, min_max, read_numeric, BinnedColumn, NumericInput};
use super::decimal::{add_exact, checked_sum, one_percent, round_cut_point, step_exact, to_decimal};
use super::error::{BinningError, Result};
use super::ranges::{format_ranges, NumericRange};
use super::settings::Bin;

/// Upper limit on generated bins, guards against a width that is tiny relative to the data span
pub const MAX_AUTO_BINS: usize = 100_000;

/// Equal-width binning with a fixed bin width.
///
/// Produces `ceil((max - min) / width) + 1` bins starting at the column
/// minimum, so the last bin may reach past the maximum.
pub fn equal_width_by_width(column: &Column, width: f64) -> Result<BinnedColumn> {
    let values = match read_numeric(column)? {
        NumericInput::AllMissing => return Ok(all_missing(column)),
        NumericInput::Values(values) => values,
    };

    if !width.is_finite() || width <= 0.0 {
        return Err(BinningError::InvalidParameter(format!(
            "bin width must be a positive number, got {}",
            width
        )));
    }

    let (min, max) = span(&values)?;
    let count = ((max - min) / width).ceil() + 1.0;
    if count > MAX_AUTO_BINS as f64 {
        return Err(BinningError::InvalidParameter(format!(
            "bin width {} would produce more than {} bins",
            width, MAX_AUTO_BINS
        )));
    }

    let ranges = width_ranges(min, width, count as usize)?;
    Ok(finish(column, &values, ranges, false))
}

/// Equal-width binning with a fixed number of bins.
///
/// The last bin's upper bound is pushed out by 1% of the width so the
/// maximum value falls inside it.
pub fn equal_width_by_count(column: &Column, num_bins: usize) -> Result<BinnedColumn> {
    let values = match read_numeric(column)? {
        NumericInput::AllMissing => return Ok(all_missing(column)),
        NumericInput::Values(values) => values,
    };

    check_bin_count(num_bins)?;

    let (min, max) = span(&values)?;
    if min == max {
        return single_bin_fallback(column, &values, min);
    }

    let width = (max - min) / num_bins as f64;
    let mut ranges = width_ranges(min, width, num_bins)?;
    if let Some(last) = ranges.last_mut() {
        last.high = widen(last.high, width)?;
    }

    Ok(finish(column, &values, ranges, false))
}

/// Equal-frequency binning aiming for `freq` rows per bin.
///
/// Uses `ceil(row_count / freq)` quantile buckets; `freq` may not exceed the
/// row count.
pub fn equal_frequency_by_freq(column: &Column, freq: usize) -> Result<BinnedColumn> {
    let values = match read_numeric(column)? {
        NumericInput::AllMissing => return Ok(all_missing(column)),
        NumericInput::Values(values) => values,
    };

    let row_count = values.len();
    if freq == 0 || freq > row_count {
        return Err(BinningError::InvalidParameter(format!(
            "rows per bin must be between 1 and {}, got {}",
            row_count, freq
        )));
    }

    let num_bins = row_count.div_ceil(freq);
    quantile_cut(column, &values, num_bins)
}

/// Equal-frequency binning with a fixed number of quantile buckets.
///
/// Duplicate cut points are dropped, so heavily tied data yields fewer bins.
pub fn equal_frequency_by_count(column: &Column, num_bins: usize) -> Result<BinnedColumn> {
    let values = match read_numeric(column)? {
        NumericInput::AllMissing => return Ok(all_missing(column)),
        NumericInput::Values(values) => values,
    };

    check_bin_count(num_bins)?;
    quantile_cut(column, &values, num_bins)
}

fn all_missing(column: &Column) -> BinnedColumn {
    BinnedColumn::all_missing(column_name(column), column.len())
}

fn check_bin_count(num_bins: usize) -> Result<()> {
    if num_bins == 0 {
        return Err(BinningError::InvalidParameter(
            "number of bins must be positive".to_string(),
        ));
    }
    if num_bins > MAX_AUTO_BINS {
        return Err(BinningError::InvalidParameter(format!(
            "number of bins must not exceed {}, got {}",
            MAX_AUTO_BINS, num_bins
        )));
    }
    Ok(())
}

fn span(values: &[Option<f64>]) -> Result<(f64, f64)> {
    min_max(values).ok_or_else(|| {
        BinningError::InvalidParameter("column has no values to bin".to_string())
    })
}

/// `count` consecutive `[min + i*width, min + (i+1)*width)` ranges
fn width_ranges(min: f64, width: f64, count: usize) -> Result<Vec<NumericRange>> {
    (0..count)
        .map(|i| {
            let low = step_exact(min, width, i)?;
            let high = add_exact(low, width)?;
            NumericRange::new(low, high)
        })
        .collect()
}

/// `high` plus 1% of `width`
fn widen(high: f64, width: f64) -> Result<f64> {
    checked_sum(to_decimal(high)?, one_percent(width)?)
}

/// Linear-interpolated quantile of sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    let h = last as f64 * q;
    let lo = (h.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Smallest and largest label precision tried for quantile cut points
const MIN_CUT_PRECISION: u32 = 3;
const MAX_CUT_PRECISION: u32 = 19;

/// Cut present values into up to `num_bins` quantile buckets
fn quantile_cut(column: &Column, values: &[Option<f64>], num_bins: usize) -> Result<BinnedColumn> {
    let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    if min == max {
        return single_bin_fallback(column, values, min);
    }

    // duplicate cut points are dropped before any rounding
    let mut cuts: Vec<f64> = Vec::with_capacity(num_bins.saturating_sub(1));
    for i in 1..num_bins {
        let cut = quantile(&sorted, i as f64 / num_bins as f64);
        if cut > cuts.last().copied().unwrap_or(min) && cut < max {
            cuts.push(cut);
        }
    }

    let mut edges = vec![min];
    edges.extend(rounded_cuts(&sorted, &cuts)?);
    edges.push(max);

    let mut ranges = edges
        .windows(2)
        .map(|pair| NumericRange::new(pair[0], pair[1]))
        .collect::<Result<Vec<_>>>()?;
    if let Some(last) = ranges.last_mut() {
        last.high = widen(last.high, last.high - last.low)?;
    }

    Ok(finish(column, values, ranges, true))
}

/// Round cut points with the smallest precision that keeps every edge
/// distinct and splits the sorted values exactly where the raw cuts do.
/// Falls back to the raw cuts when no precision up to the maximum works.
fn rounded_cuts(sorted: &[f64], cuts: &[f64]) -> Result<Vec<f64>> {
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    let split_at = |cut: f64| sorted.partition_point(|&v| v < cut);

    for precision in MIN_CUT_PRECISION..=MAX_CUT_PRECISION {
        let rounded = cuts
            .iter()
            .map(|&cut| round_cut_point(cut, precision))
            .collect::<Result<Vec<_>>>()?;

        let increasing = std::iter::once(min)
            .chain(rounded.iter().copied())
            .chain(std::iter::once(max))
            .collect::<Vec<_>>()
            .windows(2)
            .all(|pair| pair[0] < pair[1]);
        let same_split = cuts
            .iter()
            .zip(&rounded)
            .all(|(&raw, &round)| split_at(raw) == split_at(round));

        if increasing && same_split {
            return Ok(rounded);
        }
    }

    Ok(cuts.to_vec())
}

/// Every present value in one synthetic `[value, value + 1)` bin
fn single_bin_fallback(column: &Column, values: &[Option<f64>], value: f64) -> Result<BinnedColumn> {
    let range = NumericRange::new(value, add_exact(value, 1.0)?)?;
    Ok(finish(column, values, vec![range], false))
}

/// Wrap each range in its own bin and label the rows.
///
/// `ranges` must be sorted and disjoint, so each value is placed with a binary
/// search. With `observed_only`, bins no row landed in are left out of the
/// definitions.
fn finish(
    column: &Column,
    values: &[Option<f64>],
    ranges: Vec<NumericRange>,
    observed_only: bool,
) -> BinnedColumn {
    let slots: Vec<Option<usize>> = values
        .iter()
        .map(|value| {
            let value = (*value)?;
            let idx = ranges.partition_point(|range| range.high <= value);
            ranges
                .get(idx)
                .filter(|range| range.contains(value))
                .map(|_| idx)
        })
        .collect();

    let mut observed = vec![!observed_only; ranges.len()];
    for idx in slots.iter().flatten() {
        observed[*idx] = true;
    }

    let names: Vec<String> = ranges
        .iter()
        .map(|range| format_ranges(std::slice::from_ref(range)))
        .collect();
    let labels = slots
        .iter()
        .map(|slot| slot.map(|idx| names[idx].clone()))
        .collect();
    let bins = ranges
        .into_iter()
        .zip(observed)
        .filter(|(_, keep)| *keep)
        .map(|(range, _)| Bin::from_ranges(vec![range]))
        .collect();

    BinnedColumn::from_labels(column_name(column), bins, labels)
}
