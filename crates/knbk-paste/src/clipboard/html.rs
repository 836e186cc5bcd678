//! HTML clipboard tables
//!
//! Spreadsheet applications put an HTML document on the clipboard whose
//! body holds a `<table>`. The markup is HTML, not XML: void elements such
//! as `<br>` and `<meta>` are never closed, attribute values may be
//! unquoted and named entities like `&nbsp;` appear. The reader is
//! therefore run without end-name checking and with a small entity table.

use quick_xml::events::{BytesText, Event};
use quick_xml::reader::Reader;

use super::ClipboardPayload;
use crate::error::PasteResult;

/// Parse the first `<table>` of an HTML fragment.
///
/// Returns `Ok(None)` when the fragment has no table. Each `<tr>` becomes a
/// row and each `<td>`/`<th>` a cell; cell markup is reduced to its text,
/// whitespace is collapsed and trimmed. Trailing empty cells of a row are
/// dropped, interior empty cells are kept.
pub fn parse_html_table(html: &str) -> PasteResult<Option<ClipboardPayload>> {
    let mut reader = Reader::from_str(html);
    reader.check_end_names(false);
    reader.trim_text(false);

    let mut table = TableBuilder::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_ascii_lowercase();
                table.open(&name);
            }
            Event::Empty(e) => {
                let name = e.local_name().as_ref().to_ascii_lowercase();
                match name.as_slice() {
                    b"br" => table.line_break(),
                    b"td" | b"th" => {
                        table.open(&name);
                        table.close(&name);
                    }
                    _ => {}
                }
            }
            Event::End(e) => {
                let name = e.local_name().as_ref().to_ascii_lowercase();
                if table.close(&name) {
                    break;
                }
            }
            Event::Text(e) => {
                if table.in_cell() {
                    table.push_text(&decode_text(&e));
                }
            }
            Event::CData(e) => {
                if table.in_cell() {
                    table.push_text(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(table.finish())
}

/// Accumulates rows of the first table while the reader walks the document
#[derive(Debug, Default)]
struct TableBuilder {
    /// `<table>` nesting depth; 1 inside the first table
    depth: usize,
    seen_table: bool,
    done: bool,
    rows: Vec<Vec<String>>,
    row: Option<Vec<String>>,
    /// Lines of the open cell, split at `<br>`
    cell: Option<Vec<String>>,
}

impl TableBuilder {
    fn in_cell(&self) -> bool {
        self.depth == 1 && self.cell.is_some()
    }

    fn open(&mut self, name: &[u8]) {
        if self.done {
            return;
        }
        match name {
            b"table" => {
                self.depth += 1;
                self.seen_table = true;
            }
            b"tr" if self.depth == 1 => {
                self.end_row();
                self.row = Some(Vec::new());
            }
            b"td" | b"th" if self.depth == 1 => {
                self.end_cell();
                if self.row.is_none() {
                    // <td> without an enclosing <tr>
                    self.row = Some(Vec::new());
                }
                self.cell = Some(vec![String::new()]);
            }
            b"br" => self.line_break(),
            _ => {}
        }
    }

    /// Returns `true` once the first table is closed
    fn close(&mut self, name: &[u8]) -> bool {
        if self.done {
            return true;
        }
        match name {
            b"table" if self.depth > 0 => {
                self.depth -= 1;
                if self.depth == 0 {
                    self.end_row();
                    self.done = true;
                }
            }
            b"tr" if self.depth == 1 => self.end_row(),
            b"td" | b"th" if self.depth == 1 => self.end_cell(),
            _ => {}
        }
        self.done
    }

    fn line_break(&mut self) {
        if self.depth == 1 {
            if let Some(lines) = self.cell.as_mut() {
                lines.push(String::new());
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(line) = self.cell.as_mut().and_then(|lines| lines.last_mut()) {
            line.push_str(text);
        }
    }

    fn end_cell(&mut self) {
        if let Some(lines) = self.cell.take() {
            let text = lines
                .iter()
                .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
                .collect::<Vec<_>>()
                .join("\n");
            self.row
                .get_or_insert_with(Vec::new)
                .push(text.trim().to_string());
        }
    }

    fn end_row(&mut self) {
        self.end_cell();
        if let Some(mut row) = self.row.take() {
            while row.last().map_or(false, String::is_empty) {
                row.pop();
            }
            self.rows.push(row);
        }
    }

    fn finish(mut self) -> Option<ClipboardPayload> {
        if !self.seen_table {
            return None;
        }
        // Unterminated table at end of fragment
        if !self.done {
            self.end_row();
        }
        Some(ClipboardPayload::new(self.rows))
    }
}

/// Unescape a text node, falling back to the raw bytes for stray `&`
fn decode_text(text: &BytesText<'_>) -> String {
    match text.unescape_with(html_entity) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(text).into_owned(),
    }
}

/// Named HTML entities beyond the five XML ones
fn html_entity(name: &str) -> Option<&'static str> {
    match name {
        "nbsp" => Some(" "),
        "deg" => Some("°"),
        "ndash" => Some("–"),
        "mdash" => Some("—"),
        "minus" => Some("−"),
        "plusmn" => Some("±"),
        "times" => Some("×"),
        "laquo" => Some("«"),
        "raquo" => Some("»"),
        "quot" => Some("\""),
        "amp" => Some("&"),
        "lt" => Some("<"),
        "gt" => Some(">"),
        "apos" => Some("'"),
        _ => None,
    }
}
