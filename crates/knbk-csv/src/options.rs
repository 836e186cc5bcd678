//! CSV options

/// Options for reading reference files
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReferenceOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Column matched by [`find`](crate::ReferenceTable::find) (default: 0)
    pub key_column: usize,
    /// Column whose value is reported as the grouping key of a selection
    pub group_column: Option<usize>,
}

impl Default for ReferenceOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            key_column: 0,
            group_column: None,
        }
    }
}

/// Options for reading survey files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Detect and split off a header row (default: true)
    pub infer_header: bool,
}

impl Default for SurveyReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            infer_header: true,
        }
    }
}

/// Options for writing CSV files
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Write header row
    pub write_header: bool,
    /// Line terminator
    pub line_terminator: LineTerminator,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            write_header: true,
            line_terminator: LineTerminator::LF,
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
}

impl LineTerminator {
    pub(crate) fn to_csv(self) -> csv::Terminator {
        match self {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        }
    }
}

/// Delimiters of the composite string a saved assembly is stored as.
///
/// An assembly with components `(ВЗД, Д-240)` and `(УБТ, УБТ-203)` is stored
/// as `ВЗД=Д-240;УБТ=УБТ-203` with the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssemblyFormat {
    /// Separates components (default: `;`)
    pub component_delimiter: char,
    /// Separates equipment type from reference key (default: `=`)
    pub field_separator: char,
}

impl Default for AssemblyFormat {
    fn default() -> Self {
        Self {
            component_delimiter: ';',
            field_separator: '=',
        }
    }
}
