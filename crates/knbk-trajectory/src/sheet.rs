//! Tabular survey data as read from a spreadsheet or CSV file

use std::collections::HashSet;

use crate::error::TrajectoryResult;
use crate::station::{parse_number, stations_from_rows, SurveyStation};

/// Survey rows with an optional header row split off
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveySheet {
    /// Column titles, when the first row looked like a header
    pub headers: Option<Vec<String>>,
    /// Data rows
    pub rows: Vec<Vec<String>>,
}

impl SurveySheet {
    /// Split off the first row when it is a header.
    ///
    /// The first row is a header when it has at least one non-blank cell
    /// and its non-blank cells are all non-numeric and pairwise distinct.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        let headers = match rows.first() {
            Some(first) if is_header_row(first) => Some(rows.remove(0)),
            _ => None,
        };
        Self { headers, rows }
    }

    /// Parse the data rows into stations
    pub fn stations(&self) -> TrajectoryResult<Vec<SurveyStation>> {
        stations_from_rows(&self.rows)
    }

    /// Rows including the header, if any
    pub fn all_rows(&self) -> Vec<Vec<String>> {
        self.headers
            .iter()
            .cloned()
            .chain(self.rows.iter().cloned())
            .collect()
    }
}

fn is_header_row(row: &[String]) -> bool {
    let mut seen = HashSet::new();
    let mut any = false;
    for cell in row.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
        if parse_number(cell).is_some() || !seen.insert(cell) {
            return false;
        }
        any = true;
    }
    any
}
