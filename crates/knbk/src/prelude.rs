//! Prelude module - common imports for knbk users
//!
//! ```rust
//! use knbk::prelude::*;
//! ```

pub use crate::{
    // Clipboard
    ClipboardContent,
    ClipboardSource,
    StaticClipboard,

    // Errors
    Error,
    Result,

    // Pages
    PageId,
    PageKind,
    Picker,
    Workbench,
    WorkbenchConfig,

    // Tables
    TableGrid,
    TableModel,

    // Trajectory
    Position,
    SurveyStation,
};
