//! # knbk-xlsx
//!
//! Reads survey data from the first worksheet of an XLSX (Office Open XML)
//! workbook.

pub mod error;
pub mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
