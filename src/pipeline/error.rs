//! Error types for the binning pipeline.
//!
//! Each variant is a distinct decision point: an empty column, a column of the
//! wrong type, a bad numeric parameter or a malformed settings object. Rows that
//! match no bin are not errors; they come back as null labels.

use thiserror::Error;

/// Errors produced while normalizing definitions or binning a column.
#[derive(Error, Debug)]
pub enum BinningError {
    /// The column has zero rows.
    #[error("Column '{0}' is empty")]
    EmptyInput(String),

    /// The column dtype does not match what the operation requires.
    #[error("Column '{column}' must be {expected}, found {found}")]
    WrongType {
        column: String,
        expected: String,
        found: String,
    },

    /// A width, count, frequency or range bound is out of its domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The settings object has an unsupported shape or combination.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl BinningError {
    pub(crate) fn wrong_type(column: &str, expected: &str, found: impl ToString) -> Self {
        BinningError::WrongType {
            column: column.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Result alias for the binning pipeline
pub type Result<T, E = BinningError> = std::result::Result<T, E>;
