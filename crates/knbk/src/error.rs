//! Workbench error types

use std::path::PathBuf;

use thiserror::Error;

use crate::page::{PageId, PageKind};

/// Result type for workbench operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the workbench
#[derive(Debug, Error)]
pub enum Error {
    /// Table error
    #[error(transparent)]
    Core(#[from] knbk_core::Error),

    /// Paste, update or history error
    #[error(transparent)]
    Paste(#[from] knbk_paste::PasteError),

    /// Survey data error
    #[error(transparent)]
    Trajectory(#[from] knbk_trajectory::TrajectoryError),

    /// CSV error
    #[error(transparent)]
    Csv(#[from] knbk_csv::CsvError),

    /// XLSX error
    #[cfg(feature = "xlsx")]
    #[error(transparent)]
    Xlsx(#[from] knbk_xlsx::XlsxError),

    /// Paste attempted on a page that does not accept pastes
    #[error("Page {0} does not accept pastes")]
    PasteTargetNotPermitted(PageId),

    /// No page with this id
    #[error("Page {0} out of range (workbench has {1} pages)")]
    PageOutOfRange(PageId, usize),

    /// The workbench has no page of the required kind
    #[error("No {0} page configured")]
    MissingPage(PageKind),

    /// File extension not recognized for import
    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Invalid workbench configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
