//! Pipeline module - definition normalization and column binning

pub mod column;
pub mod custom;
pub mod decimal;
pub mod dispatch;
pub mod error;
pub mod loader;
pub mod ranges;
pub mod settings;
pub mod strategies;

pub use column::BinnedColumn;
pub use custom::*;
pub use dispatch::*;
pub use error::BinningError;
pub use loader::*;
pub use ranges::*;
pub use settings::*;
pub use strategies::*;
