//! Workbench pages and navigation between them

use std::fmt;

use knbk_core::{Catalog, TableGrid, TableModel};
use knbk_paste::{HistoryOptions, UndoStack};

use crate::config::PageConfig;
use crate::error::{Error, Result};

/// Index of a page in the workbench
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PageId(pub usize);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a page holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PageKind {
    /// Survey stations: measured depth, inclination, azimuth
    Survey,
    /// Bottom-hole assembly, one component per row
    Assembly,
    /// Casing design
    Casing,
    /// Free-form table
    Notes,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageKind::Survey => "survey",
            PageKind::Assembly => "assembly",
            PageKind::Casing => "casing",
            PageKind::Notes => "notes",
        };
        f.write_str(name)
    }
}

/// One page: a table, its edit history and the column layout it was built from
#[derive(Debug)]
pub struct Page {
    pub(crate) config: PageConfig,
    pub(crate) table: TableGrid,
    pub(crate) history: UndoStack,
}

impl Page {
    pub(crate) fn new(config: PageConfig, history: HistoryOptions) -> Result<Self> {
        let mut page = Self {
            table: TableGrid::new(0, config.columns.len()),
            history: UndoStack::with_options(history),
            config,
        };
        for _ in 0..page.config.rows {
            page.append_row()?;
        }
        Ok(page)
    }

    /// Page kind
    pub fn kind(&self) -> PageKind {
        self.config.kind
    }

    /// Page title
    pub fn title(&self) -> &str {
        &self.config.title
    }

    /// Layout the page was built from
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Column titles
    pub fn headers(&self) -> &[String] {
        &self.config.columns
    }

    /// The page table
    pub fn table(&self) -> &TableGrid {
        &self.table
    }

    /// Edit history of the page table
    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Append a row, pre-filling the equipment type column with its default option
    pub(crate) fn append_row(&mut self) -> Result<usize> {
        self.table.insert_row_at_end();
        let row = self.table.row_count() - 1;
        if let Some(col) = self.config.equipment_column {
            self.table
                .set(row, col, Catalog::EquipmentType.default_option())?;
        }
        Ok(row)
    }

    /// Replace the table contents with `rows`, keeping at least the configured columns
    pub(crate) fn replace_rows(&mut self, rows: &[Vec<String>]) {
        let mut table = TableGrid::from_rows(rows);
        while table.col_count() < self.config.columns.len() {
            table.insert_column_at_end();
        }
        self.table = table;
        self.history.clear();
    }
}

/// Current-page cursor over a fixed number of pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNavigator {
    current: usize,
    count: usize,
}

impl PageNavigator {
    /// Navigator positioned on the first of `count` pages
    pub fn new(count: usize) -> Self {
        Self { current: 0, count }
    }

    /// Current page
    pub fn current(&self) -> PageId {
        PageId(self.current)
    }

    /// Number of pages
    pub fn count(&self) -> usize {
        self.count
    }

    /// Check whether there is a previous page
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Check whether there is a next page
    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.count
    }

    /// Move to the next page. Returns `false` on the last page.
    pub fn next(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move to the previous page. Returns `false` on the first page.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to `page`
    pub fn go_to(&mut self, page: PageId) -> Result<()> {
        if page.0 >= self.count {
            return Err(Error::PageOutOfRange(page, self.count));
        }
        self.current = page.0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigator() {
        let mut nav = PageNavigator::new(3);
        assert_eq!(nav.current(), PageId(0));
        assert!(!nav.can_go_back());
        assert!(!nav.previous());

        assert!(nav.next());
        assert!(nav.next());
        assert!(!nav.can_go_forward());
        assert!(!nav.next());
        assert_eq!(nav.current(), PageId(2));

        assert!(nav.previous());
        assert_eq!(nav.current(), PageId(1));

        nav.go_to(PageId(0)).unwrap();
        assert!(matches!(
            nav.go_to(PageId(3)),
            Err(Error::PageOutOfRange(PageId(3), 3))
        ));
        assert_eq!(nav.current(), PageId(0));
    }

    #[test]
    fn test_empty_navigator() {
        let mut nav = PageNavigator::new(0);
        assert!(!nav.can_go_forward());
        assert!(!nav.next());
    }

    #[test]
    fn test_page_prefills_equipment_column() {
        let config = PageConfig::assembly();
        let page = Page::new(config, HistoryOptions::default()).unwrap();
        assert_eq!(page.table().row_count(), 1);
        assert_eq!(page.table().get(0, 0), Some("ВЗД"));
        assert_eq!(page.table().col_count(), page.headers().len());
    }
}
