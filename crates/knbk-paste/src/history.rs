//! Linear undo/redo history for one table

use knbk_core::TableModel;
use log::debug;

use crate::clipboard::ClipboardPayload;
use crate::command::{PasteCommand, TableCommand};
use crate::error::PasteResult;

/// How undo treats structural changes made outside the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum UndoCheck {
    /// Refuse to undo or redo when the table no longer has the shape the
    /// command left it in
    #[default]
    Strict,
    /// Remove the last rows regardless of what happened since
    Trusting,
}

/// Options for [`UndoStack`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HistoryOptions {
    /// Oldest commands are evicted past this many (default: 100)
    pub max_entries: usize,
    /// Undo ordering policy (default: strict)
    pub undo_check: UndoCheck,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            max_entries: 100,
            undo_check: UndoCheck::Strict,
        }
    }
}

/// Executed commands plus a cursor.
///
/// Commands left of the cursor can be undone, commands right of it can be
/// redone. Pushing a command discards everything right of the cursor.
#[derive(Debug, Default)]
pub struct UndoStack {
    commands: Vec<TableCommand>,
    index: usize,
    options: HistoryOptions,
}

impl UndoStack {
    /// Create an empty history with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history
    pub fn with_options(options: HistoryOptions) -> Self {
        Self {
            commands: Vec::new(),
            index: 0,
            options,
        }
    }

    /// Options in effect
    pub fn options(&self) -> &HistoryOptions {
        &self.options
    }

    /// Apply `command` to `table` and record it.
    ///
    /// A command whose apply fails is not recorded.
    pub fn push<T, C>(&mut self, table: &mut T, command: C) -> PasteResult<()>
    where
        T: TableModel + ?Sized,
        C: Into<TableCommand>,
    {
        let mut command = command.into();
        command.apply(table, self.options.undo_check)?;

        self.commands.truncate(self.index);
        self.commands.push(command);

        if self.commands.len() > self.options.max_entries {
            let excess = self.commands.len() - self.options.max_entries;
            self.commands.drain(..excess);
        }
        self.index = self.commands.len();
        Ok(())
    }

    /// Paste `payload` at `(row, col)`.
    ///
    /// Returns `false` without touching the table or the history when the
    /// payload has no cells.
    pub fn push_paste<T: TableModel + ?Sized>(
        &mut self,
        table: &mut T,
        row: usize,
        col: usize,
        payload: ClipboardPayload,
    ) -> PasteResult<bool> {
        if payload.is_empty() {
            debug!("empty clipboard payload, nothing to paste");
            return Ok(false);
        }
        self.push(table, PasteCommand::new(row, col, payload))?;
        Ok(true)
    }

    /// Reverse the command left of the cursor. Returns `false` if there is none.
    ///
    /// On error the cursor does not move.
    pub fn undo<T: TableModel + ?Sized>(&mut self, table: &mut T) -> PasteResult<bool> {
        if !self.can_undo() {
            return Ok(false);
        }
        let command = &mut self.commands[self.index - 1];
        command.reverse(table, self.options.undo_check)?;
        debug!("undo: {}", command.label());
        self.index -= 1;
        Ok(true)
    }

    /// Re-apply the command right of the cursor. Returns `false` if there is none.
    ///
    /// On error the cursor does not move.
    pub fn redo<T: TableModel + ?Sized>(&mut self, table: &mut T) -> PasteResult<bool> {
        if !self.can_redo() {
            return Ok(false);
        }
        let command = &mut self.commands[self.index];
        command.apply(table, self.options.undo_check)?;
        debug!("redo: {}", command.label());
        self.index += 1;
        Ok(true)
    }

    /// Check whether undo is possible
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check whether redo is possible
    pub fn can_redo(&self) -> bool {
        self.index < self.commands.len()
    }

    /// Label of the command undo would reverse
    pub fn undo_label(&self) -> Option<&'static str> {
        self.index
            .checked_sub(1)
            .and_then(|i| self.commands.get(i))
            .map(TableCommand::label)
    }

    /// Label of the command redo would apply
    pub fn redo_label(&self) -> Option<&'static str> {
        self.commands.get(self.index).map(TableCommand::label)
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check whether no command is recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Cursor position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Forget every command
    pub fn clear(&mut self) {
        self.commands.clear();
        self.index = 0;
    }
}
