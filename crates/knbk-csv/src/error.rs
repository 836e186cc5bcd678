//! CSV error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Reference file for an equipment type does not exist
    #[error("Reference file not found: {}", .0.display())]
    MissingReferenceFile(PathBuf),

    /// Selected row index past the end of a reference table
    #[error("Row {row} out of range (table has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] knbk_core::Error),

    /// Survey data error
    #[error("Survey error: {0}")]
    Trajectory(#[from] knbk_trajectory::TrajectoryError),
}
