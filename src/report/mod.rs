//! Report module - summarizing binning results

pub mod definitions;
pub mod summary;

pub use definitions::*;
pub use summary::*;
