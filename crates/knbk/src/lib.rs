//! # knbk
//!
//! Data-entry backend for bottom-hole assembly (КНБК) records and wellbore
//! survey data.
//!
//! ## Features
//!
//! - Spreadsheet-like pages with clipboard paste (tab-separated text or HTML
//!   tables), automatic row growth and exact undo/redo
//! - Reference pickers that fill assembly rows from per-equipment CSV files
//! - Append-only saving of templates and assemblies
//! - Survey import from XLSX or CSV and the 3D wellbore path
//!
//! ## Example
//!
//! ```rust
//! use knbk::prelude::*;
//!
//! let mut workbench = Workbench::new(WorkbenchConfig::default()).unwrap();
//! let survey = workbench.find_page(PageKind::Survey).unwrap();
//!
//! let clipboard = StaticClipboard(ClipboardContent::text("0\t0\t0\n100\t0\t0"));
//! workbench.paste(survey, 0, 0, &clipboard).unwrap();
//!
//! let path = workbench.trajectory().unwrap();
//! assert_eq!(path[1].z, 100.0);
//!
//! workbench.undo(survey).unwrap();
//! assert!(workbench.table(survey).unwrap().is_blank());
//! ```

pub mod config;
pub mod error;
pub mod page;
pub mod picker;
pub mod prelude;
pub mod workbench;

pub use config::{CatalogColumn, PageConfig, WorkbenchConfig};
pub use error::{Error, Result};
pub use page::{Page, PageId, PageKind, PageNavigator};
pub use picker::Picker;
pub use workbench::Workbench;

// Re-export the component crates' main types
pub use knbk_core::{CellAddress, Catalog, TableGrid, TableModel, BIT_LABEL};
pub use knbk_csv::{
    Assembly, AssemblyComponent, AssemblyFormat, CsvError, ReferenceOptions, ReferenceTable,
    Selection, TemplateStore,
};
pub use knbk_paste::{
    parse_clipboard, ClipboardContent, ClipboardPayload, ClipboardSource, HistoryOptions,
    PasteError, StaticClipboard, UndoCheck, UndoStack,
};
pub use knbk_trajectory::{
    integrate, PlotExtents, PlotSeries, Position, SurveySheet, SurveyStation, TrajectoryError,
};
#[cfg(feature = "xlsx")]
pub use knbk_xlsx::{XlsxError, XlsxReader};
