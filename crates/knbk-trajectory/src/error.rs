//! Trajectory error types

use thiserror::Error;

/// Result type for trajectory operations
pub type TrajectoryResult<T> = std::result::Result<T, TrajectoryError>;

/// Errors that can occur while reading survey data
#[derive(Debug, Error)]
pub enum TrajectoryError {
    /// A survey field is not a number
    #[error("Parse error at row {row}, column {column}: '{value}' is not a number")]
    Parse {
        row: usize,
        column: usize,
        value: String,
    },
}
