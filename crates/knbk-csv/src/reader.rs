//! CSV readers

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use knbk_core::{TableGrid, TableModel};
use knbk_trajectory::SurveySheet;
use log::debug;

use crate::error::{CsvError, CsvResult};
use crate::options::{ReferenceOptions, SurveyReadOptions};

/// Path of the reference file for an equipment type: `<dir>/<type>.csv`
pub fn reference_path<P: AsRef<Path>>(reference_dir: P, equipment_type: &str) -> PathBuf {
    reference_dir
        .as_ref()
        .join(format!("{}.csv", equipment_type))
}

/// A row picked from a reference table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// Every cell of the picked row, padded to the header width
    pub row: Vec<String>,
    /// Value of the group column, if one is configured and non-empty
    pub group: Option<String>,
}

/// Contents of a reference CSV file: a header row and data rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    options: ReferenceOptions,
}

impl ReferenceTable {
    /// Load a reference file.
    ///
    /// Fails with [`CsvError::MissingReferenceFile`] when `path` does not exist.
    pub fn load<P: AsRef<Path>>(path: P, options: &ReferenceOptions) -> CsvResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CsvError::MissingReferenceFile(path.to_path_buf()));
        }
        debug!("loading reference file {}", path.display());
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read a reference table from any reader
    pub fn read<R: Read>(reader: R, options: &ReferenceOptions) -> CsvResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self {
            headers,
            rows,
            options: options.clone(),
        })
    }

    /// Column titles
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, in file order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the file has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pick data row `row`
    pub fn select(&self, row: usize) -> CsvResult<Selection> {
        let values = self.rows.get(row).ok_or(CsvError::RowOutOfRange {
            row,
            len: self.rows.len(),
        })?;

        let mut values = values.clone();
        if values.len() < self.headers.len() {
            values.resize(self.headers.len(), String::new());
        }

        let group = self
            .options
            .group_column
            .and_then(|col| values.get(col))
            .filter(|g| !g.is_empty())
            .cloned();

        Ok(Selection { row: values, group })
    }

    /// First data row whose key column equals `key` (surrounding whitespace ignored)
    pub fn find(&self, key: &str) -> Option<&[String]> {
        let key = key.trim();
        self.rows
            .iter()
            .find(|row| {
                row.get(self.options.key_column)
                    .map_or(false, |cell| cell.trim() == key)
            })
            .map(Vec::as_slice)
    }

    /// Data rows as a table, for display in a picker
    pub fn to_table(&self) -> TableGrid {
        let mut table = TableGrid::from_rows(&self.rows);
        while table.col_count() < self.headers.len() {
            table.insert_column_at_end();
        }
        table
    }
}

/// Read a survey CSV file
pub fn read_survey_file<P: AsRef<Path>>(
    path: P,
    options: &SurveyReadOptions,
) -> CsvResult<SurveySheet> {
    let file = File::open(path)?;
    read_survey(file, options)
}

/// Read survey rows from CSV, splitting off a header row when one is detected
pub fn read_survey<R: Read>(reader: R, options: &SurveyReadOptions) -> CsvResult<SurveySheet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    debug!("read {} survey rows", rows.len());

    Ok(if options.infer_header {
        SurveySheet::from_rows(rows)
    } else {
        SurveySheet {
            headers: None,
            rows,
        }
    })
}
