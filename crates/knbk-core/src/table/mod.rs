//! Table model
//!
//! This module contains:
//! - [`TableModel`] - the contract the paste engine and the pages work against
//! - [`TableGrid`] - sparse in-memory implementation

mod grid;

pub use grid::TableGrid;

use crate::error::Result;

/// A rectangular grid of optional text cells with growable dimensions.
///
/// An empty string and an unset cell are the same observable state:
/// implementations must return `None` from [`TableModel::get`] after
/// `set(row, col, "")`.
pub trait TableModel {
    /// Get the text of a cell, `None` when unset
    fn get(&self, row: usize, col: usize) -> Option<&str>;

    /// Set the text of a cell inside the current dimensions
    fn set(&mut self, row: usize, col: usize, value: &str) -> Result<()>;

    /// Current number of rows
    fn row_count(&self) -> usize;

    /// Current number of columns
    fn col_count(&self) -> usize;

    /// Append an empty row
    fn insert_row_at_end(&mut self);

    /// Remove the last row and its cells. Returns `false` if the table had no rows.
    fn remove_last_row(&mut self) -> bool;

    /// Append an empty column
    fn insert_column_at_end(&mut self);

    /// `(row_count, col_count)`
    fn dimensions(&self) -> (usize, usize) {
        (self.row_count(), self.col_count())
    }

    /// Text of every column in `row`, unset cells as empty strings
    fn row_values(&self, row: usize) -> Vec<String> {
        (0..self.col_count())
            .map(|col| self.get(row, col).unwrap_or_default().to_string())
            .collect()
    }

    /// Dense copy of the whole table
    fn to_rows(&self) -> Vec<Vec<String>> {
        (0..self.row_count()).map(|row| self.row_values(row)).collect()
    }
}
