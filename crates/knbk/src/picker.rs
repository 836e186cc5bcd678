//! Reference pickers: fill assembly rows from the equipment reference files

use knbk_core::{Catalog, TableModel};
use knbk_csv::{reference_path, CsvError, ReferenceTable, Selection};
use knbk_paste::UpdateCommand;
use log::{debug, warn};

use crate::error::Result;
use crate::page::PageId;
use crate::workbench::Workbench;

/// An open reference picker for one cell
#[derive(Debug, Clone)]
pub struct Picker {
    page: PageId,
    row: usize,
    col: usize,
    equipment_type: String,
    reference: ReferenceTable,
}

impl Picker {
    /// Page the picker writes to
    pub fn page(&self) -> PageId {
        self.page
    }

    /// Target cell
    pub fn target(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Equipment type whose reference file is shown
    pub fn equipment_type(&self) -> &str {
        &self.equipment_type
    }

    /// Reference rows on offer
    pub fn reference(&self) -> &ReferenceTable {
        &self.reference
    }
}

impl Workbench {
    /// Open the reference picker for cell `(row, col)` of page `id`.
    ///
    /// Only the page's picker column opens a picker. The equipment type is
    /// read from the same row; its reference file is
    /// `<reference_dir>/<type>.csv`. Returns `None` when the cell has no
    /// picker, the type is not a known equipment type, or the reference file
    /// is missing. A missing file also resets the row's dependent catalog
    /// columns to their default options.
    pub fn open_picker(&mut self, id: PageId, row: usize, col: usize) -> Result<Option<Picker>> {
        let page = self.page(id)?;
        let config = page.config();
        let equipment_col = match (config.picker_column, config.equipment_column) {
            (Some(picker), Some(equipment)) if picker == col => equipment,
            _ => return Ok(None),
        };
        if row >= page.table().row_count() {
            return Err(knbk_core::Error::RowOutOfBounds(row, page.table().row_count()).into());
        }

        let equipment_type = page.table().get(row, equipment_col).unwrap_or("").trim();
        if !Catalog::EquipmentType.contains(equipment_type) {
            debug!("no reference file for equipment type '{}'", equipment_type);
            return Ok(None);
        }
        let equipment_type = equipment_type.to_string();

        let path = reference_path(&self.config.reference_dir, &equipment_type);
        match ReferenceTable::load(&path, &self.config.reference) {
            Ok(reference) => Ok(Some(Picker {
                page: id,
                row,
                col,
                equipment_type,
                reference,
            })),
            Err(CsvError::MissingReferenceFile(path)) => {
                warn!("reference file {} not found", path.display());
                self.reset_dependent_columns(id, row)?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write reference row `index` into the picker's row, starting at its
    /// column. The write is undoable on the page's history.
    pub fn apply_selection(&mut self, picker: &Picker, index: usize) -> Result<Selection> {
        let selection = picker.reference.select(index)?;
        let command = UpdateCommand::new(picker.row, picker.col, selection.row.clone());

        let page = self.page_mut(picker.page)?;
        page.history.push(&mut page.table, command)?;
        debug!(
            "picked '{}' for row {} of page {}",
            selection.row.first().map(String::as_str).unwrap_or(""),
            picker.row,
            picker.page
        );
        Ok(selection)
    }

    /// The picker was dismissed without a selection.
    ///
    /// When the target cell is still empty the row's dependent catalog
    /// columns are reset to their default options.
    pub fn picker_rejected(&mut self, picker: &Picker) -> Result<()> {
        let empty = self
            .table(picker.page)?
            .get(picker.row, picker.col)
            .map_or(true, str::is_empty);
        if empty {
            self.reset_dependent_columns(picker.page, picker.row)?;
        }
        Ok(())
    }

    fn reset_dependent_columns(&mut self, id: PageId, row: usize) -> Result<()> {
        let page = self.page_mut(id)?;
        for dependent in &page.config.dependent_columns {
            page.table
                .set(row, dependent.column, dependent.catalog.default_option())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkbenchConfig;
    use knbk_csv::ReferenceOptions;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    const VZD: &str = "Шифр,Наружный диаметр,Длина,Масса,Присоединение,Резьба,Присоединение,Резьба\n\
                       Д-240,240,8.2,1850,Муфта,З-171,Ниппель,З-171\n\
                       Д-172,172,7.1,980,Муфта,З-147,Ниппель,З-147\n";

    fn workbench(dir: &Path) -> Workbench {
        std::fs::write(dir.join("ВЗД.csv"), VZD).unwrap();
        Workbench::new(WorkbenchConfig {
            reference_dir: dir.to_path_buf(),
            reference: ReferenceOptions::default(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_pick_and_undo() {
        let dir = tempfile::tempdir().unwrap();
        let mut wb = workbench(dir.path());
        let assembly = PageId(1);

        let picker = wb.open_picker(assembly, 0, 1).unwrap().unwrap();
        assert_eq!(picker.equipment_type(), "ВЗД");
        assert_eq!(picker.reference().len(), 2);

        let selection = wb.apply_selection(&picker, 1).unwrap();
        assert_eq!(selection.row[0], "Д-172");
        assert_eq!(
            wb.table(assembly).unwrap().row_values(0),
            vec!["ВЗД", "Д-172", "172", "7.1", "980", "Муфта", "З-147", "Ниппель", "З-147"]
        );

        assert!(wb.undo(assembly).unwrap());
        assert_eq!(wb.table(assembly).unwrap().get(0, 1), None);
        assert_eq!(wb.table(assembly).unwrap().get(0, 0), Some("ВЗД"));
    }

    #[test]
    fn test_undo_after_row_deleted_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut wb = workbench(dir.path());
        let assembly = PageId(1);
        wb.add_row(assembly).unwrap();

        let picker = wb.open_picker(assembly, 1, 1).unwrap().unwrap();
        wb.apply_selection(&picker, 0).unwrap();
        wb.delete_row(assembly, 0).unwrap();
        let before = wb.table(assembly).unwrap().to_rows();

        assert!(matches!(
            wb.undo(assembly),
            Err(crate::Error::Paste(knbk_paste::PasteError::StaleUndoState { .. }))
        ));
        assert_eq!(wb.table(assembly).unwrap().to_rows(), before);
        assert_eq!(wb.table(assembly).unwrap().get(0, 1), Some("Д-240"));
    }

    #[test]
    fn test_only_picker_column_opens() {
        let dir = tempfile::tempdir().unwrap();
        let mut wb = workbench(dir.path());
        assert!(wb.open_picker(PageId(1), 0, 2).unwrap().is_none());
        assert!(wb.open_picker(PageId(0), 0, 1).unwrap().is_none());
        assert!(wb.open_picker(PageId(1), 4, 1).is_err());
    }

    #[test]
    fn test_missing_reference_resets_dependents() {
        let dir = tempfile::tempdir().unwrap();
        let mut wb = workbench(dir.path());
        let assembly = PageId(1);
        let page = wb.page_mut(assembly).unwrap();
        page.table.set(0, 0, "Ясс").unwrap();

        assert!(wb.open_picker(assembly, 0, 1).unwrap().is_none());
        assert_eq!(
            wb.table(assembly).unwrap().row_values(0),
            vec!["Ясс", "", "", "", "", "Ниппель", "З-76", "Ниппель", "З-76"]
        );
    }

    #[test]
    fn test_unknown_equipment_type() {
        let dir = tempfile::tempdir().unwrap();
        let mut wb = workbench(dir.path());
        wb.page_mut(PageId(1)).unwrap().table.set(0, 0, "Лом").unwrap();
        assert!(wb.open_picker(PageId(1), 0, 1).unwrap().is_none());
        assert_eq!(wb.table(PageId(1)).unwrap().get(0, 5), None);
    }

    #[test]
    fn test_rejected_picker() {
        let dir = tempfile::tempdir().unwrap();
        let mut wb = workbench(dir.path());
        let assembly = PageId(1);

        let picker = wb.open_picker(assembly, 0, 1).unwrap().unwrap();
        wb.picker_rejected(&picker).unwrap();
        assert_eq!(wb.table(assembly).unwrap().get(0, 6), Some("З-76"));

        // A filled target keeps the row as it is
        let picker = wb.open_picker(assembly, 0, 1).unwrap().unwrap();
        wb.apply_selection(&picker, 0).unwrap();
        wb.picker_rejected(&picker).unwrap();
        assert_eq!(wb.table(assembly).unwrap().get(0, 6), Some("З-171"));
    }
}
