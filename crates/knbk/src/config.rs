//! Workbench configuration

use std::path::PathBuf;

use knbk_core::Catalog;
use knbk_csv::{AssemblyFormat, ReferenceOptions};
use knbk_paste::HistoryOptions;

use crate::error::{Error, Result};
use crate::page::{PageId, PageKind};

/// A column whose value is picked from a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogColumn {
    pub column: usize,
    pub catalog: Catalog,
}

impl CatalogColumn {
    /// Bind `column` to `catalog`
    pub fn new(column: usize, catalog: Catalog) -> Self {
        Self { column, catalog }
    }
}

/// Layout of one page
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageConfig {
    pub kind: PageKind,
    pub title: String,
    /// Column titles; their count is the initial column count
    pub columns: Vec<String>,
    /// Initial row count
    #[cfg_attr(feature = "serde", serde(default))]
    pub rows: usize,
    /// Column holding the equipment type, pre-filled on new rows
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment_column: Option<usize>,
    /// Column whose cells open the reference picker
    #[cfg_attr(feature = "serde", serde(default))]
    pub picker_column: Option<usize>,
    /// Catalog columns reset to their default option when a picker is dismissed
    #[cfg_attr(feature = "serde", serde(default))]
    pub dependent_columns: Vec<CatalogColumn>,
}

fn titles(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl PageConfig {
    /// Survey page: measured depth, inclination, azimuth
    pub fn survey() -> Self {
        Self {
            kind: PageKind::Survey,
            title: "Инклинометрия".into(),
            columns: titles(&["Глубина, м", "Зенитный угол, °", "Азимут, °"]),
            rows: 20,
            equipment_column: None,
            picker_column: None,
            dependent_columns: Vec::new(),
        }
    }

    /// Assembly page: one component per row, picked from reference files
    pub fn assembly() -> Self {
        Self {
            kind: PageKind::Assembly,
            title: "КНБК".into(),
            columns: titles(&[
                "Тип",
                "Шифр",
                "Наружный диаметр, мм",
                "Длина, м",
                "Масса, кг",
                "Присоединение (верх)",
                "Резьба (верх)",
                "Присоединение (низ)",
                "Резьба (низ)",
            ]),
            rows: 1,
            equipment_column: Some(0),
            picker_column: Some(1),
            dependent_columns: vec![
                CatalogColumn::new(5, Catalog::ConnectionType),
                CatalogColumn::new(6, Catalog::ThreadSize),
                CatalogColumn::new(7, Catalog::ConnectionType),
                CatalogColumn::new(8, Catalog::ThreadSize),
            ],
        }
    }

    /// Casing design page
    pub fn casing() -> Self {
        Self {
            kind: PageKind::Casing,
            title: "Конструкция скважины".into(),
            columns: titles(&["Колонна", "Диаметр, мм", "Глубина спуска, м"]),
            rows: 0,
            equipment_column: None,
            picker_column: None,
            dependent_columns: Vec::new(),
        }
    }

    fn validate(&self) -> Result<()> {
        let width = self.columns.len();
        let bound = self
            .equipment_column
            .into_iter()
            .chain(self.picker_column)
            .chain(self.dependent_columns.iter().map(|c| c.column));
        for col in bound {
            if col >= width {
                return Err(Error::Config(format!(
                    "page '{}': column {} past the last of {} columns",
                    self.title, col, width
                )));
            }
        }
        if self.picker_column.is_some() && self.equipment_column.is_none() {
            return Err(Error::Config(format!(
                "page '{}': picker column without an equipment column",
                self.title
            )));
        }
        Ok(())
    }
}

/// Workbench configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorkbenchConfig {
    /// Directory holding one `<equipment type>.csv` reference file per type
    pub reference_dir: PathBuf,
    /// Pages in navigation order
    pub pages: Vec<PageConfig>,
    /// Pages that accept clipboard pastes
    pub paste_targets: Vec<PageId>,
    /// Undo history options, shared by every page
    pub history: HistoryOptions,
    /// How reference files are read
    pub reference: ReferenceOptions,
    /// Append-only file receiving saved assemblies
    pub assembly_store: PathBuf,
    /// Append-only file receiving rows saved as templates
    pub template_store: PathBuf,
    /// Composite string layout of saved assemblies
    pub assembly_format: AssemblyFormat,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            reference_dir: PathBuf::from("csv_files"),
            pages: vec![
                PageConfig::survey(),
                PageConfig::assembly(),
                PageConfig::casing(),
            ],
            paste_targets: vec![PageId(0)],
            history: HistoryOptions::default(),
            reference: ReferenceOptions::default(),
            assembly_store: PathBuf::from("assemblies.csv"),
            template_store: PathBuf::from("templates.csv"),
            assembly_format: AssemblyFormat::default(),
        }
    }
}

impl WorkbenchConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    #[cfg(feature = "serde")]
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Check page layouts and paste targets
    pub fn validate(&self) -> Result<()> {
        for page in &self.pages {
            page.validate()?;
        }
        if let Some(target) = self.paste_targets.iter().find(|t| t.0 >= self.pages.len()) {
            return Err(Error::PageOutOfRange(*target, self.pages.len()));
        }
        if self.history.max_entries == 0 {
            return Err(Error::Config("history.max_entries must be at least 1".into()));
        }
        Ok(())
    }

    /// Check whether `page` accepts pastes
    pub fn is_paste_target(&self, page: PageId) -> bool {
        self.paste_targets.contains(&page)
    }
}
