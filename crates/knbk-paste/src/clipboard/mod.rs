//! Clipboard content and its normalization into rows of cells
//!
//! Two flavors arrive from spreadsheets: tab-separated plain text and an
//! HTML `<table>`. Both are reduced to a [`ClipboardPayload`].

mod html;

pub use html::parse_html_table;

use log::{debug, warn};

/// Raw clipboard content as offered by the platform clipboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardContent {
    /// `text/html` flavor
    pub html: Option<String>,
    /// `text/plain` flavor
    pub text: Option<String>,
}

impl ClipboardContent {
    /// Content with only a plain-text flavor
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            html: None,
            text: Some(text.into()),
        }
    }

    /// Content with only an HTML flavor
    pub fn html<S: Into<String>>(html: S) -> Self {
        Self {
            html: Some(html.into()),
            text: None,
        }
    }

    /// Add a plain-text flavor
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Check whether neither flavor is present
    pub fn is_empty(&self) -> bool {
        self.html.is_none() && self.text.is_none()
    }
}

/// Something that can be asked for the current clipboard content
pub trait ClipboardSource {
    /// Snapshot the clipboard
    fn content(&self) -> ClipboardContent;
}

/// Fixed clipboard content, for headless use and tests
#[derive(Debug, Clone, Default)]
pub struct StaticClipboard(pub ClipboardContent);

impl ClipboardSource for StaticClipboard {
    fn content(&self) -> ClipboardContent {
        self.0.clone()
    }
}

/// Normalized clipboard data: rows of cell strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardPayload {
    rows: Vec<Vec<String>>,
}

impl ClipboardPayload {
    /// Create a payload from rows of cells
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a payload from anything row-shaped
    pub fn from_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Rows in source order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Take the rows
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    /// Number of source rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of cells across all rows
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// A payload without cells pastes nothing
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }
}

/// Normalize clipboard content.
///
/// The HTML flavor wins when it contains a table; otherwise the plain-text
/// flavor is used. Malformed HTML degrades to an empty payload.
pub fn parse_clipboard(content: &ClipboardContent) -> ClipboardPayload {
    if let Some(html) = &content.html {
        match parse_html_table(html) {
            Ok(Some(payload)) => {
                debug!(
                    "parsed HTML clipboard table: {} rows, {} cells",
                    payload.row_count(),
                    payload.cell_count()
                );
                return payload;
            }
            Ok(None) => debug!("HTML clipboard has no table, falling back to plain text"),
            Err(e) => {
                warn!("ignoring malformed HTML clipboard: {}", e);
                return ClipboardPayload::default();
            }
        }
    }

    match &content.text {
        Some(text) => parse_plain_text(text),
        None => ClipboardPayload::default(),
    }
}

/// Split tab-separated text into rows of cells.
///
/// Cells are kept verbatim, empty ones included. A single trailing line
/// break (spreadsheets always append one) does not produce an extra row.
/// Text made of line breaks only is empty.
pub fn parse_plain_text(text: &str) -> ClipboardPayload {
    if text.chars().all(|c| c == '\n' || c == '\r') {
        return ClipboardPayload::default();
    }

    let rows = text
        .lines()
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect();
    ClipboardPayload::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_rows_and_cells() {
        let payload = parse_plain_text("1\t2\t3\n4\t5\t6\n");
        assert_eq!(
            payload.into_rows(),
            vec![vec!["1", "2", "3"], vec!["4", "5", "6"]]
        );
    }

    #[test]
    fn test_plain_text_keeps_interior_empty_cells() {
        let payload = parse_plain_text("A\t\tC");
        assert_eq!(payload.into_rows(), vec![vec!["A", "", "C"]]);
    }

    #[test]
    fn test_plain_text_keeps_trailing_empty_cells() {
        let payload = parse_plain_text("A\t\t\r\nB\t \t");
        assert_eq!(
            payload.into_rows(),
            vec![vec!["A", "", ""], vec!["B", " ", ""]]
        );
    }

    #[test]
    fn test_plain_text_blank_is_empty() {
        assert!(parse_plain_text("").is_empty());
        assert!(parse_plain_text("\r\n").is_empty());
        assert!(parse_plain_text("\n\n").is_empty());
    }

    #[test]
    fn test_plain_text_blank_cells_kept() {
        assert_eq!(parse_plain_text("\t\n").into_rows(), vec![vec!["", ""]]);
        assert_eq!(parse_plain_text(" ").into_rows(), vec![vec![" "]]);
        assert_eq!(
            parse_plain_text("\n  \n").into_rows(),
            vec![vec![""], vec!["  "]]
        );
    }

    #[test]
    fn test_html_and_text_are_equivalent() {
        let html = parse_clipboard(&ClipboardContent::html(
            "<table><tr><td>A</td><td>B</td></tr></table>",
        ));
        let text = parse_clipboard(&ClipboardContent::text("A\tB"));

        assert_eq!(html, text);
        assert_eq!(html.into_rows(), vec![vec!["A", "B"]]);
    }

    #[test]
    fn test_html_preferred_over_text() {
        let content = ClipboardContent::html("<table><tr><td>from html</td></tr></table>")
            .with_text("from text");
        assert_eq!(
            parse_clipboard(&content).into_rows(),
            vec![vec!["from html"]]
        );
    }

    #[test]
    fn test_html_without_table_falls_back_to_text() {
        let content = ClipboardContent::html("<p>just a paragraph</p>").with_text("x\ty");
        assert_eq!(parse_clipboard(&content).into_rows(), vec![vec!["x", "y"]]);
    }

    #[test]
    fn test_no_flavor_is_empty() {
        let source = StaticClipboard::default();
        assert!(source.content().is_empty());
        assert!(parse_clipboard(&source.content()).is_empty());
    }
}
