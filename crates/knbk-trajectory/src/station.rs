//! Survey stations

use crate::error::{TrajectoryError, TrajectoryResult};

/// One survey measurement
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurveyStation {
    /// Measured depth along the hole
    pub measured_depth: f64,
    /// Inclination from vertical, degrees
    pub inclination_deg: f64,
    /// Azimuth, degrees
    pub azimuth_deg: f64,
}

impl SurveyStation {
    /// Create a survey station
    pub fn new(measured_depth: f64, inclination_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            measured_depth,
            inclination_deg,
            azimuth_deg,
        }
    }
}

/// Parse a survey number, accepting a comma as decimal separator
pub fn parse_number(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    field
        .parse::<f64>()
        .ok()
        .or_else(|| field.replace(',', ".").parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Read stations from the first three columns of each row, in row order.
///
/// Rows whose first three cells are all blank are skipped. The first
/// unparsable field fails the whole read; `row` and `column` in the error
/// are 0-based positions in `rows`.
pub fn stations_from_rows<R, S>(rows: &[R]) -> TrajectoryResult<Vec<SurveyStation>>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut stations = Vec::with_capacity(rows.len());

    for (row_idx, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let field = |col: usize| row.get(col).map(|s| s.as_ref()).unwrap_or("");

        if (0..3).all(|col| field(col).trim().is_empty()) {
            continue;
        }

        let mut values = [0.0; 3];
        for (col, value) in values.iter_mut().enumerate() {
            *value = parse_number(field(col)).ok_or_else(|| TrajectoryError::Parse {
                row: row_idx,
                column: col,
                value: field(col).to_string(),
            })?;
        }

        stations.push(SurveyStation::new(values[0], values[1], values[2]));
    }

    Ok(stations)
}
