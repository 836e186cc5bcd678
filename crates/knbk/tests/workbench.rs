//! End-to-end tests through the workbench API

use knbk::prelude::*;
use knbk::{parse_clipboard, Assembly, AssemblyComponent, PageConfig, PasteError, UndoCheck};
use pretty_assertions::assert_eq;

fn notes_page(rows: usize, cols: usize) -> PageConfig {
    PageConfig {
        kind: PageKind::Notes,
        title: "Заметки".into(),
        columns: (0..cols).map(|c| format!("Колонка {}", c + 1)).collect(),
        rows,
        equipment_column: None,
        picker_column: None,
        dependent_columns: Vec::new(),
    }
}

fn single_page(rows: usize, cols: usize) -> Workbench {
    Workbench::new(WorkbenchConfig {
        pages: vec![notes_page(rows, cols)],
        paste_targets: vec![PageId(0)],
        ..Default::default()
    })
    .unwrap()
}

fn text(s: &str) -> StaticClipboard {
    StaticClipboard(ClipboardContent::text(s))
}

fn cells(wb: &Workbench, page: PageId) -> Vec<Vec<String>> {
    wb.table(page).unwrap().to_rows()
}

/// Paste two rows at the last row of a 3x2 table, then undo
#[test]
fn test_paste_grows_and_undo_restores() {
    let mut wb = single_page(3, 2);
    let page = PageId(0);

    assert!(wb.paste(page, 2, 0, &text("x\ty\nz\tw")).unwrap());

    let table = wb.table(page).unwrap();
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.get(2, 0), Some("x"));
    assert_eq!(table.get(2, 1), Some("y"));
    assert_eq!(table.get(3, 0), Some("z"));
    assert_eq!(table.get(3, 1), Some("w"));

    assert!(wb.undo(page).unwrap());
    let table = wb.table(page).unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.get(2, 0), None);
    assert_eq!(table.get(2, 1), None);
}

#[test]
fn test_html_and_text_paste_agree() {
    let html = ClipboardContent::html("<table><tr><td>A</td><td>B</td></tr></table>");
    let plain = ClipboardContent::text("A\tB");
    assert_eq!(parse_clipboard(&html), parse_clipboard(&plain));
    assert_eq!(
        parse_clipboard(&plain).rows(),
        &[vec!["A".to_string(), "B".to_string()]]
    );

    let mut from_html = single_page(1, 2);
    let mut from_text = single_page(1, 2);
    from_html.paste(PageId(0), 0, 0, &StaticClipboard(html)).unwrap();
    from_text.paste(PageId(0), 0, 0, &StaticClipboard(plain)).unwrap();
    assert_eq!(cells(&from_html, PageId(0)), cells(&from_text, PageId(0)));
}

#[test]
fn test_interior_empty_cell_kept() {
    let payload = parse_clipboard(&ClipboardContent::text("A\t\tC"));
    assert_eq!(payload.rows()[0], vec!["A", "", "C"]);

    let mut wb = single_page(1, 3);
    wb.paste(PageId(0), 0, 0, &text("A\t\tC")).unwrap();
    assert_eq!(wb.table(PageId(0)).unwrap().row_values(0), vec!["A", "", "C"]);
}

#[test]
fn test_wrap_continues_at_start_column() {
    let mut wb = single_page(1, 2);
    wb.paste(PageId(0), 0, 1, &text("a\tb\tc\nd\te")).unwrap();
    assert_eq!(
        cells(&wb, PageId(0)),
        vec![
            vec!["", "a"],
            vec!["b", "c"],
            vec!["", "d"],
            vec!["e", ""],
        ]
    );

    wb.undo(PageId(0)).unwrap();
    assert_eq!(cells(&wb, PageId(0)), vec![vec!["", ""]]);
}

#[test]
fn test_structural_edit_blocks_stale_undo() {
    let mut wb = single_page(1, 2);
    let page = PageId(0);
    wb.paste(page, 0, 0, &text("1\t2\n3\t4")).unwrap();
    wb.add_row(page).unwrap();

    assert!(matches!(
        wb.undo(page),
        Err(Error::Paste(PasteError::StaleUndoState { .. }))
    ));
    assert_eq!(wb.table(page).unwrap().row_count(), 3);

    wb.delete_last_row(page).unwrap();
    assert!(wb.undo(page).unwrap());
    assert_eq!(cells(&wb, page), vec![vec!["", ""]]);
}

#[test]
fn test_trusting_undo_removes_last_rows() {
    let mut config = WorkbenchConfig {
        pages: vec![notes_page(1, 1)],
        paste_targets: vec![PageId(0)],
        ..Default::default()
    };
    config.history.undo_check = UndoCheck::Trusting;
    let mut wb = Workbench::new(config).unwrap();
    let page = PageId(0);

    wb.paste(page, 0, 0, &text("a\nb")).unwrap();
    wb.add_row(page).unwrap();
    assert!(wb.undo(page).unwrap());
    // The added row is removed in place of the pasted one
    assert_eq!(cells(&wb, page), vec![vec![""], vec![""]]);
}

#[test]
fn test_import_survey_csv_and_plot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("survey.csv");
    std::fs::write(&path, "Глубина,Зенит,Азимут\n0,0,0\n10,5,0\n20,10,90\n").unwrap();

    let mut wb = Workbench::new(WorkbenchConfig::default()).unwrap();
    let stations = wb.import_survey(&path).unwrap();
    assert_eq!(stations.len(), 3);

    let survey = wb.find_page(PageKind::Survey).unwrap();
    assert_eq!(wb.table(survey).unwrap().dimensions(), (3, 3));

    let path = wb.trajectory().unwrap();
    assert_eq!(path.len(), 3);
    assert_eq!(path[0], Position::new(0.0, 0.0, 0.0));
    assert!((path[2].y - 1.736_481_776_669_303).abs() < 1e-9);

    let extents = knbk::PlotExtents::of(&path).unwrap();
    assert!((extents.z.maximum - path[2].z).abs() < 1e-12);

    let series = knbk::PlotSeries::from_positions(&path).depth_down();
    assert_eq!(series.len(), 3);
    assert_eq!(series.zs[2], -path[2].z);
}

#[test]
fn test_import_bad_survey_keeps_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("survey.csv");
    std::fs::write(&path, "0,0,0\n10,пять,0\n").unwrap();

    let mut wb = Workbench::new(WorkbenchConfig::default()).unwrap();
    assert!(matches!(
        wb.import_survey(&path),
        Err(Error::Trajectory(_))
    ));
    assert_eq!(wb.table(PageId(0)).unwrap().row_count(), 20);
}

#[test]
fn test_assembly_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let refs = dir.path().join("csv_files");
    std::fs::create_dir(&refs).unwrap();
    std::fs::write(refs.join("ВЗД.csv"), "Шифр,Диаметр\nД-240,240\n").unwrap();
    std::fs::write(refs.join("УБТ.csv"), "Шифр,Диаметр\nУБТ-203,203\n").unwrap();

    let mut wb = Workbench::new(WorkbenchConfig {
        reference_dir: refs,
        assembly_store: dir.path().join("assemblies.csv"),
        paste_targets: vec![PageId(0), PageId(1)],
        ..Default::default()
    })
    .unwrap();
    let assembly = wb.find_page(PageKind::Assembly).unwrap();

    let picker = wb.open_picker(assembly, 0, 1).unwrap().unwrap();
    wb.apply_selection(&picker, 0).unwrap();
    wb.add_row(assembly).unwrap();
    wb.paste(assembly, 1, 0, &text("УБТ\tУБТ-203")).unwrap();
    // A component without a key is not saved
    wb.add_row(assembly).unwrap();

    let saved = wb.save_assembly(assembly, "Секция 1").unwrap();
    assert_eq!(
        saved,
        Assembly {
            name: "Секция 1".into(),
            components: vec![
                AssemblyComponent::new("ВЗД", "Д-240"),
                AssemblyComponent::new("УБТ", "УБТ-203"),
            ],
        }
    );

    wb.clear_contents(assembly).unwrap();
    assert!(wb.load_assembly(assembly, "Секция 1").unwrap());

    let table = wb.table(assembly).unwrap();
    assert_eq!(table.dimensions(), (2, 9));
    assert_eq!(table.row_values(0)[..3].to_vec(), vec!["ВЗД", "Д-240", "240"]);
    assert_eq!(table.row_values(1)[..3].to_vec(), vec!["УБТ", "УБТ-203", "203"]);
    assert!(!wb.page(assembly).unwrap().history().can_undo());

    assert!(!wb.load_assembly(assembly, "Секция 2").unwrap());
}
