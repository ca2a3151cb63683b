//! Structured error types for calgrid.
//!
//! Hard errors are detected before any cell computation begins
//! (validate-then-compute), so a failed layout run never produces
//! partial output.

use chrono::NaiveDate;

/// All errors that can occur while computing a layout.
#[derive(Debug, thiserror::Error)]
pub enum CalgridError {
    /// End date precedes start date.
    #[error("invalid date range: end {end} precedes start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Non-positive column count or page dimension.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error (CLI output only; the engine performs no I/O).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CalgridError>;
