//! # knbk-core
//!
//! Core data structures for the KNBK workbench.
//!
//! This crate provides the fundamental types used throughout the workspace:
//! - [`TableModel`] and [`TableGrid`] - the editable tables behind every page
//! - [`CellAddress`] - cell addressing
//! - [`Catalog`] - the fixed option lists offered by pickers
//!
//! ## Example
//!
//! ```rust
//! use knbk_core::{TableGrid, TableModel};
//!
//! let mut table = TableGrid::new(1, 3);
//! table.set(0, 0, "Долото").unwrap();
//! table.insert_row_at_end();
//!
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.get(0, 0), Some("Долото"));
//! ```

pub mod address;
pub mod catalog;
pub mod error;
pub mod table;

// Re-exports for convenience
pub use address::CellAddress;
pub use catalog::{Catalog, BIT_LABEL};
pub use error::{Error, Result};
pub use table::{TableGrid, TableModel};
