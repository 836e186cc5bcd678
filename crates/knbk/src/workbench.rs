//! The workbench: pages, clipboard paste with undo, survey import and trajectory

use std::path::Path;

use knbk_core::{TableGrid, TableModel};
use knbk_csv::{
    expand_assembly, find_assembly, read_survey_file, Assembly, SurveyReadOptions, TemplateStore,
};
use knbk_paste::{parse_clipboard, ClipboardSource};
use knbk_trajectory::{integrate, stations_from_rows, Position, SurveySheet, SurveyStation};
use log::{debug, info};

use crate::config::WorkbenchConfig;
use crate::error::{Error, Result};
use crate::page::{Page, PageId, PageKind, PageNavigator};

/// All pages of a data-entry session
#[derive(Debug)]
pub struct Workbench {
    pub(crate) config: WorkbenchConfig,
    pub(crate) pages: Vec<Page>,
    navigator: PageNavigator,
}

impl Workbench {
    /// Build the pages described by `config`
    pub fn new(config: WorkbenchConfig) -> Result<Self> {
        config.validate()?;
        let pages = config
            .pages
            .iter()
            .map(|page| Page::new(page.clone(), config.history.clone()))
            .collect::<Result<Vec<_>>>()?;
        let navigator = PageNavigator::new(pages.len());
        Ok(Self {
            config,
            pages,
            navigator,
        })
    }

    /// Configuration in effect
    pub fn config(&self) -> &WorkbenchConfig {
        &self.config
    }

    /// All pages
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Get a page
    pub fn page(&self, id: PageId) -> Result<&Page> {
        self.pages
            .get(id.0)
            .ok_or(Error::PageOutOfRange(id, self.pages.len()))
    }

    pub(crate) fn page_mut(&mut self, id: PageId) -> Result<&mut Page> {
        let count = self.pages.len();
        self.pages
            .get_mut(id.0)
            .ok_or(Error::PageOutOfRange(id, count))
    }

    /// Table of a page
    pub fn table(&self, id: PageId) -> Result<&TableGrid> {
        Ok(self.page(id)?.table())
    }

    /// First page of `kind`
    pub fn find_page(&self, kind: PageKind) -> Result<PageId> {
        self.pages
            .iter()
            .position(|page| page.kind() == kind)
            .map(PageId)
            .ok_or(Error::MissingPage(kind))
    }

    /// Page navigation
    pub fn navigator(&self) -> &PageNavigator {
        &self.navigator
    }

    /// Page navigation
    pub fn navigator_mut(&mut self) -> &mut PageNavigator {
        &mut self.navigator
    }

    /// The page the navigator is on
    pub fn current_page(&self) -> Result<&Page> {
        self.page(self.navigator.current())
    }

    /// Paste the clipboard into page `id` at `(row, col)`.
    ///
    /// Pages that are not paste targets are rejected before the clipboard is
    /// read. Returns `false` when the clipboard holds nothing to paste.
    pub fn paste(
        &mut self,
        id: PageId,
        row: usize,
        col: usize,
        clipboard: &dyn ClipboardSource,
    ) -> Result<bool> {
        self.page(id)?;
        if !self.config.is_paste_target(id) {
            return Err(Error::PasteTargetNotPermitted(id));
        }

        let payload = parse_clipboard(&clipboard.content());
        debug!(
            "paste {} rows into page {} at ({}, {})",
            payload.row_count(),
            id,
            row,
            col
        );

        let page = self.page_mut(id)?;
        Ok(page.history.push_paste(&mut page.table, row, col, payload)?)
    }

    /// Paste starting at the top of column `col`
    pub fn paste_at_column_header(
        &mut self,
        id: PageId,
        col: usize,
        clipboard: &dyn ClipboardSource,
    ) -> Result<bool> {
        self.paste(id, 0, col, clipboard)
    }

    /// Undo the last edit of page `id`. Returns `false` if there is none.
    pub fn undo(&mut self, id: PageId) -> Result<bool> {
        let page = self.page_mut(id)?;
        Ok(page.history.undo(&mut page.table)?)
    }

    /// Redo the last undone edit of page `id`. Returns `false` if there is none.
    pub fn redo(&mut self, id: PageId) -> Result<bool> {
        let page = self.page_mut(id)?;
        Ok(page.history.redo(&mut page.table)?)
    }

    /// Append a row to page `id` and return its index
    pub fn add_row(&mut self, id: PageId) -> Result<usize> {
        self.page_mut(id)?.append_row()
    }

    /// Remove row `row` of page `id`, shifting the rows below up
    pub fn delete_row(&mut self, id: PageId, row: usize) -> Result<()> {
        self.page_mut(id)?.table.remove_row(row)?;
        Ok(())
    }

    /// Remove the last row of page `id`. Returns `false` on an empty table.
    pub fn delete_last_row(&mut self, id: PageId) -> Result<bool> {
        Ok(self.page_mut(id)?.table.remove_last_row())
    }

    /// Clear every cell of page `id`, keeping its dimensions
    pub fn clear_contents(&mut self, id: PageId) -> Result<()> {
        self.page_mut(id)?.table.clear_contents();
        Ok(())
    }

    /// Load a survey file (`.xlsx`, `.xlsm` or `.csv`) into the survey page.
    ///
    /// The page table is replaced by the file's data rows and its history
    /// cleared. Returns the parsed stations.
    pub fn import_survey<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<SurveyStation>> {
        let path = path.as_ref();
        let sheet = read_survey_sheet(path)?;
        let stations = sheet.stations()?;

        let id = self.find_page(PageKind::Survey)?;
        self.page_mut(id)?.replace_rows(&sheet.rows);
        info!(
            "imported {} survey stations from {}",
            stations.len(),
            path.display()
        );
        Ok(stations)
    }

    /// Stations currently entered on the survey page
    pub fn survey_stations(&self) -> Result<Vec<SurveyStation>> {
        let table = self.table(self.find_page(PageKind::Survey)?)?;
        Ok(stations_from_rows(&table.to_rows())?)
    }

    /// Wellbore path of the survey page
    pub fn trajectory(&self) -> Result<Vec<Position>> {
        Ok(integrate(&self.survey_stations()?))
    }

    /// Append row `row` of page `id` to the template store
    pub fn save_row_as_template(&self, id: PageId, row: usize) -> Result<()> {
        let table = self.table(id)?;
        if row >= table.row_count() {
            return Err(knbk_core::Error::RowOutOfBounds(row, table.row_count()).into());
        }
        TemplateStore::new(&self.config.template_store).append_row(&table.row_values(row))?;
        Ok(())
    }

    /// Append the components of page `id` to the assembly store under `name`
    pub fn save_assembly(&self, id: PageId, name: &str) -> Result<Assembly> {
        let assembly = Assembly::from_rows(name, &self.table(id)?.to_rows());
        TemplateStore::new(&self.config.assembly_store)
            .append_assembly(&assembly, &self.config.assembly_format)?;
        info!(
            "saved assembly '{}' with {} components",
            name,
            assembly.components.len()
        );
        Ok(assembly)
    }

    /// Replace page `id` with the saved assembly `name`, expanded from the
    /// reference files. Returns `false` if no assembly has that name.
    pub fn load_assembly(&mut self, id: PageId, name: &str) -> Result<bool> {
        self.page(id)?;
        let store = &self.config.assembly_store;
        if !store.is_file() {
            return Ok(false);
        }

        let assembly = match find_assembly(store, name, &self.config.assembly_format)? {
            Some(assembly) => assembly,
            None => return Ok(false),
        };
        let rows = expand_assembly(
            &assembly,
            &self.config.reference_dir,
            &self.config.reference,
        )?;

        self.page_mut(id)?.replace_rows(&rows);
        Ok(true)
    }
}

fn read_survey_sheet(path: &Path) -> Result<SurveySheet> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        #[cfg(feature = "xlsx")]
        Some("xlsx") | Some("xlsm") => Ok(knbk_xlsx::XlsxReader::read_survey_file(path)?),
        Some("csv") => Ok(read_survey_file(path, &SurveyReadOptions::default())?),
        _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
    }
}
