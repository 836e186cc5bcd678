//! Undoable table edits
//!
//! Every edit is a [`TableCommand`] variant that owns its before/after state
//! and is applied and reversed against a table borrowed for the duration of
//! the call.

use std::collections::BTreeMap;

use knbk_core::{CellAddress, TableModel};
use log::{debug, warn};

use crate::clipboard::ClipboardPayload;
use crate::error::{PasteError, PasteResult};
use crate::history::UndoCheck;

/// Number of rows that must be appended so `needed_cells` fit into the
/// table, counting from `(start_row, start_col)` to the end in row-major
/// order.
///
/// ```
/// use knbk_paste::rows_needed;
///
/// // 3x2 table, paste 4 cells into the last row: one extra row
/// assert_eq!(rows_needed(2, 0, 3, 2, 4), 1);
/// ```
pub fn rows_needed(
    start_row: usize,
    start_col: usize,
    row_count: usize,
    col_count: usize,
    needed_cells: usize,
) -> usize {
    if col_count == 0 {
        return 0;
    }
    // available = capacity - start_col, which may be negative
    let capacity = row_count.saturating_sub(start_row) * col_count;
    let missing = (needed_cells + start_col).saturating_sub(capacity);
    (missing + col_count - 1) / col_count
}

/// State captured the first time a paste is applied
#[derive(Debug, Clone)]
struct AppliedPaste {
    /// Rows appended by the most recent apply
    rows_created: usize,
    /// Cell text before the first apply; first write wins
    prior_values: BTreeMap<CellAddress, String>,
    dimensions_before: (usize, usize),
    dimensions_after: (usize, usize),
}

/// Paste a clipboard payload into a table starting at one cell
#[derive(Debug, Clone)]
pub struct PasteCommand {
    start_row: usize,
    start_col: usize,
    payload: ClipboardPayload,
    applied: Option<AppliedPaste>,
}

impl PasteCommand {
    /// Create a paste of `payload` anchored at `(start_row, start_col)`
    pub fn new(start_row: usize, start_col: usize, payload: ClipboardPayload) -> Self {
        Self {
            start_row,
            start_col,
            payload,
            applied: None,
        }
    }

    /// Anchor cell
    pub fn start(&self) -> CellAddress {
        CellAddress::new(self.start_row, self.start_col)
    }

    /// The payload being pasted
    pub fn payload(&self) -> &ClipboardPayload {
        &self.payload
    }

    /// Rows appended by the last apply, `0` before the first apply
    pub fn rows_created(&self) -> usize {
        self.applied.as_ref().map_or(0, |a| a.rows_created)
    }

    /// Cell text recorded before the first apply
    pub fn prior_value(&self, row: usize, col: usize) -> Option<&str> {
        self.applied
            .as_ref()
            .and_then(|a| a.prior_values.get(&CellAddress::new(row, col)))
            .map(String::as_str)
    }

    /// Write the payload into `table`, growing it at the end as needed.
    ///
    /// Cells that run past the last column continue on the next row at
    /// column 0; every new payload row starts again at the anchor column.
    pub fn apply<T: TableModel + ?Sized>(
        &mut self,
        table: &mut T,
        check: UndoCheck,
    ) -> PasteResult<()> {
        let (row_count, col_count) = table.dimensions();
        if col_count == 0 {
            return Err(PasteError::NoColumns);
        }
        if self.start_col >= col_count || self.start_row > row_count {
            return Err(PasteError::AnchorOutOfBounds {
                row: self.start_row,
                col: self.start_col,
                row_count,
                col_count,
            });
        }
        if let (Some(applied), UndoCheck::Strict) = (&self.applied, check) {
            if table.dimensions() != applied.dimensions_before {
                return Err(PasteError::stale(
                    applied.dimensions_before,
                    table.dimensions(),
                ));
            }
        }

        let dimensions_before = table.dimensions();
        let grow = rows_needed(
            self.start_row,
            self.start_col,
            row_count,
            col_count,
            self.payload.cell_count(),
        );
        for _ in 0..grow {
            table.insert_row_at_end();
        }
        let mut rows_created = grow;

        let record = self.applied.is_none();
        let mut prior_values = BTreeMap::new();

        let mut row = self.start_row;
        for source_row in self.payload.rows() {
            let mut col = self.start_col;
            for value in source_row {
                if col >= col_count {
                    row += 1;
                    col = 0;
                }
                while row >= table.row_count() {
                    table.insert_row_at_end();
                    rows_created += 1;
                }
                if record {
                    prior_values
                        .entry(CellAddress::new(row, col))
                        .or_insert_with(|| table.get(row, col).unwrap_or_default().to_string());
                }
                table.set(row, col, value)?;
                col += 1;
            }
            row += 1;
        }

        debug!(
            "pasted {} cells at {} ({} rows created)",
            self.payload.cell_count(),
            self.start(),
            rows_created
        );

        let dimensions_after = table.dimensions();
        match self.applied.as_mut() {
            Some(applied) => {
                applied.rows_created = rows_created;
                applied.dimensions_before = dimensions_before;
                applied.dimensions_after = dimensions_after;
            }
            None => {
                self.applied = Some(AppliedPaste {
                    rows_created,
                    prior_values,
                    dimensions_before,
                    dimensions_after,
                });
            }
        }
        Ok(())
    }

    /// Restore the recorded cell text and remove the appended rows.
    ///
    /// Rows are removed from the end of the table. With [`UndoCheck::Strict`]
    /// the table must still have the shape the last apply left it in;
    /// with [`UndoCheck::Trusting`] the last rows are removed whatever they
    /// hold and writes outside the table are skipped.
    pub fn reverse<T: TableModel + ?Sized>(
        &mut self,
        table: &mut T,
        check: UndoCheck,
    ) -> PasteResult<()> {
        let applied = self.applied.as_ref().ok_or(PasteError::NotApplied)?;

        if check == UndoCheck::Strict && table.dimensions() != applied.dimensions_after {
            return Err(PasteError::stale(
                applied.dimensions_after,
                table.dimensions(),
            ));
        }

        for (addr, value) in &applied.prior_values {
            if addr.row < table.row_count() && addr.col < table.col_count() {
                table.set(addr.row, addr.col, value)?;
            } else {
                warn!("undo skips cell {} outside the table", addr);
            }
        }
        for _ in 0..applied.rows_created {
            table.remove_last_row();
        }

        debug!(
            "reverted paste at {} ({} rows removed)",
            self.start(),
            applied.rows_created
        );
        Ok(())
    }
}

/// Write one row of values starting at a cell, as a reference picker
/// selection does. Values past the last column are dropped.
#[derive(Debug, Clone)]
pub struct UpdateCommand {
    row: usize,
    start_col: usize,
    values: Vec<String>,
    before: Option<Vec<String>>,
    /// Table dimensions after the last apply
    dimensions: Option<(usize, usize)>,
}

impl UpdateCommand {
    /// Create an update of `values` written rightwards from `(row, start_col)`
    pub fn new(row: usize, start_col: usize, values: Vec<String>) -> Self {
        Self {
            row,
            start_col,
            values,
            before: None,
            dimensions: None,
        }
    }

    /// Row being updated
    pub fn row(&self) -> usize {
        self.row
    }

    /// Values being written
    pub fn values(&self) -> &[String] {
        &self.values
    }

    fn columns<T: TableModel + ?Sized>(&self, table: &T) -> std::ops::Range<usize> {
        let end = (self.start_col + self.values.len()).min(table.col_count());
        self.start_col.min(end)..end
    }

    fn check_row<T: TableModel + ?Sized>(&self, table: &T) -> PasteResult<()> {
        if self.row >= table.row_count() {
            return Err(knbk_core::Error::RowOutOfBounds(self.row, table.row_count()).into());
        }
        Ok(())
    }

    fn check_shape<T>(&self, table: &T, check: UndoCheck) -> PasteResult<()>
    where
        T: TableModel + ?Sized,
    {
        if let (Some(expected), UndoCheck::Strict) = (self.dimensions, check) {
            if table.dimensions() != expected {
                return Err(PasteError::stale(expected, table.dimensions()));
            }
        }
        Ok(())
    }

    /// Write the values, recording the previous text on first apply.
    ///
    /// With [`UndoCheck::Strict`] a re-apply requires the table to have the
    /// shape the first apply saw.
    pub fn apply<T: TableModel + ?Sized>(
        &mut self,
        table: &mut T,
        check: UndoCheck,
    ) -> PasteResult<()> {
        self.check_shape(table, check)?;
        self.check_row(table)?;
        let columns = self.columns(table);

        if self.values.len() > columns.len() {
            debug!(
                "update of row {} drops {} values past the last column",
                self.row,
                self.values.len() - columns.len()
            );
        }

        if self.before.is_none() {
            self.before = Some(
                columns
                    .clone()
                    .map(|col| table.get(self.row, col).unwrap_or_default().to_string())
                    .collect(),
            );
        }
        for (col, value) in columns.zip(&self.values) {
            table.set(self.row, col, value)?;
        }
        self.dimensions = Some(table.dimensions());
        Ok(())
    }

    /// Restore the previous text.
    ///
    /// With [`UndoCheck::Strict`] the table must still have the shape the
    /// last apply left it in, so rows moved by structural edits are never
    /// written.
    pub fn reverse<T: TableModel + ?Sized>(
        &mut self,
        table: &mut T,
        check: UndoCheck,
    ) -> PasteResult<()> {
        let before = self.before.as_ref().ok_or(PasteError::NotApplied)?;
        self.check_shape(table, check)?;
        self.check_row(table)?;
        let columns = self.columns(table);
        for (col, value) in columns.zip(before) {
            table.set(self.row, col, value)?;
        }
        Ok(())
    }
}

/// An undoable edit of one table
#[derive(Debug, Clone)]
pub enum TableCommand {
    /// Clipboard paste
    Paste(PasteCommand),
    /// Row update from a reference picker
    Update(UpdateCommand),
}

impl TableCommand {
    /// Short human-readable description
    pub fn label(&self) -> &'static str {
        match self {
            TableCommand::Paste(_) => "Paste",
            TableCommand::Update(_) => "Update row",
        }
    }

    /// Apply (or re-apply) the edit
    pub fn apply<T: TableModel + ?Sized>(
        &mut self,
        table: &mut T,
        check: UndoCheck,
    ) -> PasteResult<()> {
        match self {
            TableCommand::Paste(cmd) => cmd.apply(table, check),
            TableCommand::Update(cmd) => cmd.apply(table, check),
        }
    }

    /// Reverse the edit
    pub fn reverse<T: TableModel + ?Sized>(
        &mut self,
        table: &mut T,
        check: UndoCheck,
    ) -> PasteResult<()> {
        match self {
            TableCommand::Paste(cmd) => cmd.reverse(table, check),
            TableCommand::Update(cmd) => cmd.reverse(table, check),
        }
    }
}

impl From<PasteCommand> for TableCommand {
    fn from(cmd: PasteCommand) -> Self {
        TableCommand::Paste(cmd)
    }
}

impl From<UpdateCommand> for TableCommand {
    fn from(cmd: UpdateCommand) -> Self {
        TableCommand::Update(cmd)
    }
}
