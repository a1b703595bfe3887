//! Binmachine: Column Binning Library
//!
//! Discretizes numerical and categorical columns into named, non-overlapping
//! bins (equal-width, equal-frequency or custom), and normalizes overlapping
//! range/element declarations into canonical bin definitions.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
