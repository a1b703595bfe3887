//! Range and element normalization
//!
//! Users declare bin members as possibly-overlapping `(column, low, high)`
//! ranges or `(column, elements)` lists. This module folds those declarations
//! into one canonical, overlap-free definition per column and renders range
//! lists as the stable strings used for bin names.

use serde::{Deserialize, Serialize};

use super::error::{BinningError, Result};

/// A half-open interval `[low, high)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct NumericRange {
    /// Lower bound (inclusive)
    pub low: f64,
    /// Upper bound (exclusive)
    pub high: f64,
}

impl NumericRange {
    /// Create a range, rejecting NaN bounds and `low >= high`
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if low.is_nan() || high.is_nan() {
            return Err(BinningError::InvalidParameter(format!(
                "range bounds must be numbers, got [{}, {})",
                low, high
            )));
        }
        if low >= high {
            return Err(BinningError::InvalidParameter(format!(
                "range lower bound must be below upper bound, got [{}, {})",
                low, high
            )));
        }
        Ok(Self { low, high })
    }

    /// Half-open containment: `low <= value < high`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value < self.high
    }
}

impl TryFrom<[f64; 2]> for NumericRange {
    type Error = BinningError;

    fn try_from(bounds: [f64; 2]) -> Result<Self> {
        NumericRange::new(bounds[0], bounds[1])
    }
}

impl From<NumericRange> for [f64; 2] {
    fn from(range: NumericRange) -> Self {
        [range.low, range.high]
    }
}

impl std::fmt::Display for NumericRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.low, self.high)
    }
}

/// Canonical numeric definition for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRangeDef {
    pub column: String,
    /// Sorted ascending by lower bound, pairwise non-overlapping
    pub ranges: Vec<NumericRange>,
}

/// Canonical categorical definition for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnElementDef {
    pub column: String,
    /// First-seen order, no duplicates
    pub elements: Vec<String>,
}

/// How an incoming range relates to one already stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlap {
    /// Incoming range swallows the stored one
    Covers,
    /// Stored range already holds the incoming one
    CoveredBy,
    /// Incoming range reaches the stored one from below
    Left,
    /// Incoming range reaches the stored one from above
    Right,
    None,
}

fn classify(incoming: &NumericRange, stored: &NumericRange) -> Overlap {
    let (a, d) = (incoming, stored);
    if a.low <= d.low && a.high >= d.high {
        Overlap::Covers
    } else if d.low <= a.low && d.high >= a.high {
        Overlap::CoveredBy
    } else if a.low <= d.low && a.high >= d.low && a.high <= d.high {
        Overlap::Left
    } else if a.low >= d.low && a.low <= d.high && a.high >= d.high {
        Overlap::Right
    } else {
        Overlap::None
    }
}

/// Fold one incoming range into a column's stored ranges.
///
/// The incoming range grows into a running union while the stored ranges are
/// scanned once; every stored range it touches collapses into the first one
/// touched. Stored ranges never overlap or touch each other, so one scan
/// reaches every range the union can reach.
fn merge_range(stored: &mut Vec<NumericRange>, incoming: NumericRange) {
    let mut running = incoming;
    let mut touched: Vec<usize> = Vec::new();
    let mut covered = false;

    for (idx, existing) in stored.iter().enumerate() {
        match classify(&running, existing) {
            Overlap::Covers => touched.push(idx),
            Overlap::CoveredBy => covered = true,
            Overlap::Left => {
                running.high = existing.high;
                touched.push(idx);
            }
            Overlap::Right => {
                running.low = existing.low;
                touched.push(idx);
            }
            Overlap::None => {}
        }
    }

    match touched.split_first() {
        Some((&first, rest)) => {
            stored[first] = running;
            for &idx in rest.iter().rev() {
                stored.remove(idx);
            }
        }
        None if !covered => stored.push(running),
        None => {}
    }
}

/// Stable ascending sort by lower bound; ties keep first-seen order
pub fn sort_ranges(ranges: &mut [NumericRange]) {
    ranges.sort_by(|a, b| a.low.total_cmp(&b.low));
}

/// Normalize `(column, low, high)` declarations into one sorted,
/// overlap-free range list per column, columns in first-seen order.
pub fn normalize_numeric_declarations(
    declarations: &[(String, f64, f64)],
) -> Result<Vec<ColumnRangeDef>> {
    let mut defs: Vec<ColumnRangeDef> = Vec::new();

    for (column, low, high) in declarations {
        let range = NumericRange::new(*low, *high)?;
        match defs.iter_mut().find(|def| &def.column == column) {
            Some(def) => merge_range(&mut def.ranges, range),
            None => defs.push(ColumnRangeDef {
                column: column.clone(),
                ranges: vec![range],
            }),
        }
    }

    for def in &mut defs {
        sort_ranges(&mut def.ranges);
    }

    Ok(defs)
}

/// Union `(column, elements)` declarations per column, keeping the first
/// occurrence of every element.
pub fn normalize_categorical_declarations(
    declarations: &[(String, Vec<String>)],
) -> Vec<ColumnElementDef> {
    let mut defs: Vec<ColumnElementDef> = Vec::new();

    for (column, elements) in declarations {
        let idx = match defs.iter().position(|def| &def.column == column) {
            Some(idx) => idx,
            None => {
                defs.push(ColumnElementDef {
                    column: column.clone(),
                    elements: Vec::new(),
                });
                defs.len() - 1
            }
        };
        let target = &mut defs[idx].elements;
        for element in elements {
            if !target.contains(element) {
                target.push(element.clone());
            }
        }
    }

    defs
}

/// Render ranges as `[[low1, high1), [low2, high2)]` after sorting them.
///
/// Numbers use the shortest round-trip form, so whole values print without a
/// fractional part. An empty list renders as `[]`.
pub fn format_ranges(ranges: &[NumericRange]) -> String {
    let mut sorted = ranges.to_vec();
    sort_ranges(&mut sorted);
    let parts: Vec<String> = sorted.iter().map(|r| r.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

/// Render categorical elements as `[a, b, c]` in the given order
pub fn format_elements(elements: &[String]) -> String {
    format!("[{}]", elements.join(", "))
}
