//! Decimal-exact edge arithmetic
//!
//! Bin edges are accumulated on `rust_decimal::Decimal` values parsed from the
//! shortest round-trip string of each float, so `0.1 + 0.2` lands on `0.3`
//! instead of `0.30000000000000004`. Results are converted back to `f64` only
//! for comparison and display.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::{BinningError, Result};

/// Largest number of fractional digits a `Decimal` can carry
const MAX_SCALE: i64 = 28;

/// Parse a float through its shortest decimal representation
pub fn to_decimal(value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(BinningError::InvalidParameter(format!(
            "cannot use non-finite value {} as a bin edge",
            value
        )));
    }
    let text = value.to_string();
    Decimal::from_str(&text).map_err(|_| {
        BinningError::InvalidParameter(format!(
            "value {} is outside the supported decimal range",
            text
        ))
    })
}

/// Convert a decimal back to the nearest float
pub fn to_float(value: Decimal) -> Result<f64> {
    f64::from_str(&value.normalize().to_string()).map_err(|_| {
        BinningError::InvalidParameter(format!("decimal {} does not fit in f64", value))
    })
}

/// `a + b` computed on decimals
pub fn add_exact(a: f64, b: f64) -> Result<f64> {
    checked_sum(to_decimal(a)?, to_decimal(b)?)
}

/// `a + b` on decimals, converted back to a float
pub fn checked_sum(a: Decimal, b: Decimal) -> Result<f64> {
    let sum = a
        .checked_add(b)
        .ok_or_else(|| BinningError::InvalidParameter("bin edge overflow".to_string()))?;
    to_float(sum)
}

/// `base + step * index` computed on decimals
pub fn step_exact(base: f64, step: f64, index: usize) -> Result<f64> {
    let offset = to_decimal(step)?
        .checked_mul(Decimal::from(index))
        .ok_or_else(|| BinningError::InvalidParameter("bin edge overflow".to_string()))?;
    checked_sum(to_decimal(base)?, offset)
}

/// One percent of `width`, computed on decimals
pub fn one_percent(width: f64) -> Result<Decimal> {
    Ok(to_decimal(width)? * Decimal::new(1, 2))
}

/// Round a cut point the way quantile labels are rounded: `precision`
/// decimals, or `precision` significant digits after the leading zeros when
/// `|x| < 1`.
pub fn round_cut_point(value: f64, precision: u32) -> Result<f64> {
    if value == 0.0 || !value.is_finite() {
        return Ok(value);
    }
    let precision = i64::from(precision);
    let digits = if value.trunc() == 0.0 {
        -(value.fract().abs().log10().floor() as i64) - 1 + precision
    } else {
        precision
    };
    let digits = digits.clamp(0, MAX_SCALE) as u32;
    let rounded = to_decimal(value)?
        .round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven);
    to_float(rounded)
}
