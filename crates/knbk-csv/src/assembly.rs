//! Saved bottom-hole assemblies

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use log::warn;

use crate::error::{CsvError, CsvResult};
use crate::options::{AssemblyFormat, ReferenceOptions};
use crate::reader::{reference_path, ReferenceTable};

/// One tool of an assembly: its equipment type and reference key
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssemblyComponent {
    pub equipment_type: String,
    pub key: String,
}

impl AssemblyComponent {
    /// Create a component
    pub fn new<T: Into<String>, K: Into<String>>(equipment_type: T, key: K) -> Self {
        Self {
            equipment_type: equipment_type.into(),
            key: key.into(),
        }
    }
}

/// A named, ordered list of components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assembly {
    pub name: String,
    pub components: Vec<AssemblyComponent>,
}

impl Assembly {
    /// Collect components from assembly page rows.
    ///
    /// Column 0 holds the equipment type and column 1 the reference key.
    /// Rows missing either are skipped.
    pub fn from_rows<R, S>(name: impl Into<String>, rows: &[R]) -> Self
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let components = rows
            .iter()
            .filter_map(|row| {
                let row = row.as_ref();
                let equipment_type = row.first()?.as_ref().trim();
                let key = row.get(1)?.as_ref().trim();
                if equipment_type.is_empty() || key.is_empty() {
                    return None;
                }
                Some(AssemblyComponent::new(equipment_type, key))
            })
            .collect();

        Self {
            name: name.into(),
            components,
        }
    }

    /// Composite string of all components
    pub fn encode(&self, format: &AssemblyFormat) -> String {
        let delimiter = format.component_delimiter.to_string();
        self.components
            .iter()
            .map(|c| format!("{}{}{}", c.equipment_type, format.field_separator, c.key))
            .collect::<Vec<_>>()
            .join(&delimiter)
    }

    /// Parse a composite string. Components without a separator are skipped.
    pub fn decode(name: impl Into<String>, composite: &str, format: &AssemblyFormat) -> Self {
        let components = composite
            .split(format.component_delimiter)
            .filter(|part| !part.trim().is_empty())
            .filter_map(|part| {
                let parsed = part.split_once(format.field_separator);
                if parsed.is_none() {
                    warn!("assembly component '{}' has no separator, skipped", part);
                }
                parsed
            })
            .map(|(equipment_type, key)| AssemblyComponent::new(equipment_type.trim(), key.trim()))
            .collect();

        Self {
            name: name.into(),
            components,
        }
    }
}

/// Read every assembly saved in a store file, in file order
pub fn load_assemblies<P: AsRef<Path>>(
    path: P,
    format: &AssemblyFormat,
) -> CsvResult<Vec<Assembly>> {
    let file = File::open(path)?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut assemblies = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        if let (Some(name), Some(composite)) = (record.get(0), record.get(1)) {
            assemblies.push(Assembly::decode(name, composite, format));
        }
    }
    Ok(assemblies)
}

/// Find the assembly saved under `name`. The latest save wins.
pub fn find_assembly<P: AsRef<Path>>(
    path: P,
    name: &str,
    format: &AssemblyFormat,
) -> CsvResult<Option<Assembly>> {
    Ok(load_assemblies(path, format)?
        .into_iter()
        .rev()
        .find(|a| a.name == name))
}

/// Rebuild assembly rows from the reference files in `reference_dir`.
///
/// Each row is the equipment type followed by the matching reference row.
/// Components whose reference file or key cannot be found produce no row.
pub fn expand_assembly<P: AsRef<Path>>(
    assembly: &Assembly,
    reference_dir: P,
    options: &ReferenceOptions,
) -> CsvResult<Vec<Vec<String>>> {
    let mut tables: HashMap<&str, Option<ReferenceTable>> = HashMap::new();
    let mut rows = Vec::with_capacity(assembly.components.len());

    for component in &assembly.components {
        let equipment_type = component.equipment_type.as_str();
        if !tables.contains_key(equipment_type) {
            let path = reference_path(reference_dir.as_ref(), equipment_type);
            let table = match ReferenceTable::load(&path, options) {
                Ok(table) => Some(table),
                Err(CsvError::MissingReferenceFile(path)) => {
                    warn!("no reference file {}", path.display());
                    None
                }
                Err(e) => return Err(e),
            };
            tables.insert(equipment_type, table);
        }

        let found = tables
            .get(equipment_type)
            .and_then(Option::as_ref)
            .and_then(|table| table.find(&component.key));

        match found {
            Some(reference) => {
                let mut row = Vec::with_capacity(reference.len() + 1);
                row.push(component.equipment_type.clone());
                row.extend(reference.iter().cloned());
                rows.push(row);
            }
            None => warn!(
                "'{}' not found in {} reference, row skipped",
                component.key, equipment_type
            ),
        }
    }

    Ok(rows)
}
