//! Sparse table storage
//!
//! Only non-empty cells are stored, using a row-based BTreeMap structure.
//! Dimensions are tracked separately so a table can have empty trailing
//! rows and columns, the way a form table on screen does.

use std::collections::BTreeMap;

use super::TableModel;
use crate::error::{Error, Result};

/// Sparse row-based table
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, String>>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableGrid {
    /// Row index → column map
    rows: BTreeMap<usize, BTreeMap<usize, String>>,
    row_count: usize,
    col_count: usize,
}

impl TableGrid {
    /// Create an empty table with the given dimensions
    pub fn new(row_count: usize, col_count: usize) -> Self {
        Self {
            rows: BTreeMap::new(),
            row_count,
            col_count,
        }
    }

    /// Build a table from dense rows. The column count is the widest row.
    pub fn from_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for (row_idx, row) in rows.into_iter().enumerate() {
            table.row_count = row_idx + 1;
            for (col_idx, value) in row.into_iter().enumerate() {
                table.col_count = table.col_count.max(col_idx + 1);
                table.store(row_idx, col_idx, value.as_ref());
            }
        }
        table
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check whether no cell holds text
    pub fn is_blank(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over all non-empty cells in row order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.rows.iter().flat_map(|(&row, cols)| {
            cols.iter()
                .map(move |(&col, value)| (row, col, value.as_str()))
        })
    }

    /// Remove a row anywhere in the table, shifting the rows below it up
    pub fn remove_row(&mut self, row: usize) -> Result<()> {
        if row >= self.row_count {
            return Err(Error::RowOutOfBounds(row, self.row_count));
        }

        let below = self.rows.split_off(&row);
        for (idx, cols) in below {
            if idx > row {
                self.rows.insert(idx - 1, cols);
            }
        }
        self.row_count -= 1;
        Ok(())
    }

    /// Clear every cell, keeping the dimensions
    pub fn clear_contents(&mut self) {
        self.rows.clear();
    }

    /// Change the row count, dropping cells of removed rows
    pub fn set_row_count(&mut self, row_count: usize) {
        let _dropped = self.rows.split_off(&row_count);
        self.row_count = row_count;
    }

    fn store(&mut self, row: usize, col: usize, value: &str) {
        if value.is_empty() {
            // Remove empty cells to save memory
            if let Some(row_map) = self.rows.get_mut(&row) {
                row_map.remove(&col);
                if row_map.is_empty() {
                    self.rows.remove(&row);
                }
            }
        } else {
            self.rows
                .entry(row)
                .or_default()
                .insert(col, value.to_string());
        }
    }
}

impl TableModel for TableGrid {
    fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(&row)
            .and_then(|r| r.get(&col))
            .map(String::as_str)
    }

    fn set(&mut self, row: usize, col: usize, value: &str) -> Result<()> {
        if row >= self.row_count {
            return Err(Error::RowOutOfBounds(row, self.row_count));
        }
        if col >= self.col_count {
            return Err(Error::ColumnOutOfBounds(col, self.col_count));
        }
        self.store(row, col, value);
        Ok(())
    }

    fn row_count(&self) -> usize {
        self.row_count
    }

    fn col_count(&self) -> usize {
        self.col_count
    }

    fn insert_row_at_end(&mut self) {
        self.row_count += 1;
    }

    fn remove_last_row(&mut self) -> bool {
        if self.row_count == 0 {
            return false;
        }
        self.row_count -= 1;
        self.rows.remove(&self.row_count);
        true
    }

    fn insert_column_at_end(&mut self) {
        self.col_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_operations() {
        let mut table = TableGrid::new(2, 3);

        table.set(0, 0, "Долото").unwrap();
        assert_eq!(table.get(0, 0), Some("Долото"));
        assert_eq!(table.get(1, 1), None);

        assert!(table.set(2, 0, "x").is_err());
        assert!(table.set(0, 3, "x").is_err());
    }

    #[test]
    fn test_empty_cells_not_stored() {
        let mut table = TableGrid::new(1, 1);

        table.set(0, 0, "42").unwrap();
        assert_eq!(table.cell_count(), 1);

        table.set(0, 0, "").unwrap();
        assert_eq!(table.cell_count(), 0);
        assert_eq!(table.get(0, 0), None);
        assert!(table.is_blank());
    }

    #[test]
    fn test_grow_and_shrink() {
        let mut table = TableGrid::new(1, 1);
        table.insert_row_at_end();
        table.insert_column_at_end();
        assert_eq!(table.dimensions(), (2, 2));

        table.set(1, 1, "last").unwrap();
        assert!(table.remove_last_row());
        assert_eq!(table.row_count(), 1);

        // Re-grown row starts out empty
        table.insert_row_at_end();
        assert_eq!(table.get(1, 1), None);

        assert!(table.remove_last_row());
        assert!(table.remove_last_row());
        assert!(!table.remove_last_row());
    }

    #[test]
    fn test_remove_row_shifts_up() {
        let mut table = TableGrid::from_rows([["a", "1"], ["b", "2"], ["c", "3"]]);

        table.remove_row(1).unwrap();
        assert_eq!(
            table.to_rows(),
            vec![vec!["a", "1"], vec!["c", "3"]]
        );
        assert!(table.remove_row(5).is_err());
    }

    #[test]
    fn test_from_rows_uses_widest_row() {
        let table = TableGrid::from_rows(vec![vec!["a"], vec!["b", "", "c"]]);
        assert_eq!(table.dimensions(), (2, 3));
        assert_eq!(table.row_values(0), vec!["a", "", ""]);
        assert_eq!(table.cell_count(), 3);
    }

    #[test]
    fn test_clear_and_truncate() {
        let mut table = TableGrid::from_rows([["a", "b"], ["c", "d"]]);
        table.set_row_count(1);
        assert_eq!(table.to_rows(), vec![vec!["a", "b"]]);

        table.clear_contents();
        assert_eq!(table.dimensions(), (1, 2));
        assert!(table.is_blank());
    }
}
