//! Paste and history error types

use thiserror::Error;

/// Result type for paste and undo operations
pub type PasteResult<T> = std::result::Result<T, PasteError>;

/// Errors that can occur while parsing, applying or reversing a paste
#[derive(Debug, Error)]
pub enum PasteError {
    /// Clipboard HTML could not be tokenized
    #[error("Malformed clipboard content: {0}")]
    Malformed(String),

    /// The target table has no columns to paste into
    #[error("Target table has no columns")]
    NoColumns,

    /// The paste anchor lies outside the target table
    #[error("Paste anchor ({row}, {col}) outside table of {row_count}x{col_count}")]
    AnchorOutOfBounds {
        row: usize,
        col: usize,
        row_count: usize,
        col_count: usize,
    },

    /// The table changed shape since the command was applied or reversed
    #[error(
        "Stale undo state: table is {actual_rows}x{actual_cols}, expected {expected_rows}x{expected_cols}"
    )]
    StaleUndoState {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    /// Reverse was requested for a command that was never applied
    #[error("Command has not been applied")]
    NotApplied,

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] knbk_core::Error),
}

impl PasteError {
    pub(crate) fn stale(expected: (usize, usize), actual: (usize, usize)) -> Self {
        PasteError::StaleUndoState {
            expected_rows: expected.0,
            expected_cols: expected.1,
            actual_rows: actual.0,
            actual_cols: actual.1,
        }
    }
}

impl From<quick_xml::Error> for PasteError {
    fn from(err: quick_xml::Error) -> Self {
        PasteError::Malformed(err.to_string())
    }
}
