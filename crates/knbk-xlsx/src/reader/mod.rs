//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use knbk_core::{CellAddress, TableGrid};
use knbk_trajectory::SurveySheet;
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};

const FALLBACK_SHEET: &str = "xl/worksheets/sheet1.xml";

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// `_x000d_` is a carriage return, `_x000a_` a line feed, `_x0009_` a tab and
/// `_x005f_` an escaped underscore.
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    result.push_str(rest);
    result
}

/// Reads the first worksheet of an XLSX workbook as text cells
pub struct XlsxReader;

impl XlsxReader {
    /// Read survey rows from a file path
    pub fn read_survey_file<P: AsRef<Path>>(path: P) -> XlsxResult<SurveySheet> {
        let file = File::open(path)?;
        Self::read_survey(file)
    }

    /// Read survey rows, splitting off a header row when one is detected
    pub fn read_survey<R: Read + Seek>(reader: R) -> XlsxResult<SurveySheet> {
        Ok(SurveySheet::from_rows(Self::read_rows(reader)?))
    }

    /// Read the first worksheet into a table
    pub fn read_table<R: Read + Seek>(reader: R) -> XlsxResult<TableGrid> {
        Ok(TableGrid::from_rows(Self::read_rows(reader)?))
    }

    /// Read the first worksheet as dense rows of text.
    ///
    /// Numbers keep their stored text, booleans become `TRUE`/`FALSE` and
    /// formula cells contribute their cached value. Rows missing from the
    /// sheet come back empty.
    pub fn read_rows<R: Read + Seek>(reader: R) -> XlsxResult<Vec<Vec<String>>> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let path = Self::first_sheet_path(&mut archive)?;
        debug!("reading worksheet {}", path);

        Self::read_worksheet(&mut archive, &path, &shared_strings)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));

        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current.clear();
                    }
                    b"t" if in_si && !in_phonetic => in_t = true,
                    b"rPh" => in_phonetic = true,
                    _ => {}
                },
                Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
                Event::End(e) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current));
                        in_si = false;
                    }
                    b"t" => in_t = false,
                    b"rPh" => in_phonetic = false,
                    _ => {}
                },
                Event::Text(e) if in_t => current.push_str(&e.unescape()?),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Path of the first sheet listed in workbook.xml.
    ///
    /// Falls back to `xl/worksheets/sheet1.xml` when the workbook part or its
    /// relationships do not resolve.
    fn first_sheet_path<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<String> {
        let r_id = Self::first_sheet_id(archive)?;
        let rels = Self::read_workbook_rels(archive)?;

        let path = r_id.and_then(|id| rels.get(&id).cloned());
        match path {
            Some(path) => Ok(path),
            None if archive.by_name(FALLBACK_SHEET).is_ok() => Ok(FALLBACK_SHEET.to_string()),
            None => Err(XlsxError::MissingPart("worksheet".into())),
        }
    }

    /// Relationship id of the first `<sheet>` in workbook.xml
    fn first_sheet_id<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Option<String>> {
        let file = match archive.by_name("xl/workbook.xml") {
            Ok(f) => f,
            Err(_) => return Ok(None),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        let mut buf = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
                    return Ok(attribute(&e, b"id"));
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
            buf.clear();
        }
    }

    /// Read workbook.xml.rels to get worksheet paths by relationship id
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let mut rels = HashMap::new();
        let file = match archive.by_name("xl/_rels/workbook.xml.rels") {
            Ok(f) => f,
            Err(_) => return Ok(rels),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        let mut buf = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e)
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let id = attribute(&e, b"Id");
                    let target = attribute(&e, b"Target");
                    let rel_type = attribute(&e, b"Type");

                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Targets are relative to xl/ unless absolute
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read the cells of a worksheet part
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        shared_strings: &[String],
    ) -> XlsxResult<Vec<Vec<String>>> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        let mut buf = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();

        let mut current_row: Option<usize> = None;
        let mut next_col = 0usize;
        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"row" => {
                        let r = attribute(&e, b"r").and_then(|r| r.parse::<usize>().ok());
                        current_row = Some(match r {
                            Some(r) => r.saturating_sub(1),
                            None => current_row.map_or(0, |prev| prev + 1),
                        });
                        next_col = 0;
                    }
                    b"c" => cell = Some(PendingCell::start(&e, current_row.unwrap_or(0), next_col)?),
                    b"v" if cell.is_some() => in_value = true,
                    b"t" if cell.is_some() => in_inline_text = true,
                    _ => {}
                },
                Event::Empty(e) if e.local_name().as_ref() == b"c" => {
                    let empty = PendingCell::start(&e, current_row.unwrap_or(0), next_col)?;
                    next_col = empty.col + 1;
                }
                Event::Text(e) if in_value || in_inline_text => {
                    if let Some(cell) = cell.as_mut() {
                        cell.text.push_str(&e.unescape()?);
                    }
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"v" => in_value = false,
                    b"t" => in_inline_text = false,
                    b"c" => {
                        if let Some(done) = cell.take() {
                            next_col = done.col + 1;
                            let (row, col) = (done.row, done.col);
                            let value = done.finish(shared_strings)?;
                            if !value.is_empty() {
                                place(&mut rows, row, col, value);
                            }
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(rows)
    }
}

/// A `<c>` element being read
struct PendingCell {
    row: usize,
    col: usize,
    cell_type: Option<String>,
    text: String,
}

impl PendingCell {
    fn start(e: &BytesStart, row: usize, next_col: usize) -> XlsxResult<Self> {
        let (row, col) = match attribute(e, b"r") {
            Some(reference) => {
                let addr = CellAddress::parse(&reference).map_err(|err| {
                    XlsxError::Parse(format!("Invalid cell reference '{}': {}", reference, err))
                })?;
                (addr.row, addr.col)
            }
            None => (row, next_col),
        };
        Ok(Self {
            row,
            col,
            cell_type: attribute(e, b"t"),
            text: String::new(),
        })
    }

    fn finish(self, shared_strings: &[String]) -> XlsxResult<String> {
        let value = match self.cell_type.as_deref() {
            Some("s") => {
                let idx: usize = self.text.trim().parse().map_err(|_| {
                    XlsxError::Parse(format!("Invalid shared string index: {}", self.text))
                })?;
                shared_strings.get(idx).cloned().ok_or_else(|| {
                    XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                })?
            }
            Some("b") => {
                if self.text == "1" || self.text.eq_ignore_ascii_case("true") {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
            Some("inlineStr") | Some("str") => decode_excel_escapes(&self.text),
            _ => self.text,
        };
        Ok(value)
    }
}

fn attribute(e: &BytesStart, local_name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == local_name)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.to_string()))
}

fn place(rows: &mut Vec<Vec<String>>, row: usize, col: usize, value: String) {
    if rows.len() <= row {
        rows.resize_with(row + 1, Vec::new);
    }
    let cells = &mut rows[row];
    if cells.len() <= col {
        cells.resize(col + 1, String::new());
    }
    cells[col] = value;
}
