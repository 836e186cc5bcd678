//! # knbk-paste
//!
//! Clipboard paste with exact undo/redo for KNBK tables.
//!
//! Clipboard content (tab-separated text or an HTML table) is normalized
//! into a [`ClipboardPayload`], applied to a table by a [`PasteCommand`]
//! that grows the table as needed, and recorded on an [`UndoStack`] so the
//! paste can be reversed cell for cell.
//!
//! ## Example
//!
//! ```rust
//! use knbk_core::{TableGrid, TableModel};
//! use knbk_paste::{parse_clipboard, ClipboardContent, UndoStack};
//!
//! let mut table = TableGrid::new(3, 2);
//! let mut history = UndoStack::new();
//!
//! let payload = parse_clipboard(&ClipboardContent::text("x\ty\nz\tw\n"));
//! history.push_paste(&mut table, 2, 0, payload).unwrap();
//! assert_eq!(table.row_count(), 4);
//!
//! history.undo(&mut table).unwrap();
//! assert_eq!(table.row_count(), 3);
//! ```

pub mod clipboard;
pub mod command;
pub mod error;
pub mod history;

pub use clipboard::{
    parse_clipboard, parse_html_table, parse_plain_text, ClipboardContent, ClipboardPayload,
    ClipboardSource, StaticClipboard,
};
pub use command::{rows_needed, PasteCommand, TableCommand, UpdateCommand};
pub use error::{PasteError, PasteResult};
pub use history::{HistoryOptions, UndoCheck, UndoStack};
