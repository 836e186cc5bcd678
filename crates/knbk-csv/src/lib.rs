//! # knbk-csv
//!
//! CSV files of the KNBK workbench:
//!
//! - reference files the equipment pickers read (`<dir>/<type>.csv`)
//! - the append-only store for saved templates and assemblies
//! - survey import and trajectory export
//!
//! ## Example
//!
//! ```rust
//! use knbk_csv::{ReferenceOptions, ReferenceTable};
//!
//! let csv = "Шифр,Диаметр\nД-240,240\n";
//! let table = ReferenceTable::read(csv.as_bytes(), &ReferenceOptions::default()).unwrap();
//!
//! assert_eq!(table.find("Д-240").map(|row| row[1].as_str()), Some("240"));
//! ```

mod assembly;
mod error;
mod options;
mod reader;
mod writer;

pub use assembly::{expand_assembly, find_assembly, load_assemblies, Assembly, AssemblyComponent};
pub use error::{CsvError, CsvResult};
pub use options::{AssemblyFormat, CsvWriteOptions, LineTerminator, ReferenceOptions, SurveyReadOptions};
pub use reader::{read_survey, read_survey_file, reference_path, ReferenceTable, Selection};
pub use writer::{write_series, TemplateStore};
