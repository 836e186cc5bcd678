//! Property tests for paste reversal and row growth

use knbk_core::{TableGrid, TableModel};
use knbk_paste::{rows_needed, ClipboardPayload, PasteCommand, UndoCheck, UndoStack};
use proptest::prelude::*;

fn table_strategy() -> impl Strategy<Value = TableGrid> {
    (0usize..6, 1usize..5).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec("[a-c]{0,2}", cols), rows)
            .prop_map(move |cells| {
                let mut table = TableGrid::new(rows, cols);
                for (r, row) in cells.iter().enumerate() {
                    for (c, value) in row.iter().enumerate() {
                        table.set(r, c, value).unwrap();
                    }
                }
                table
            })
    })
}

fn payload_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec("[x-z]{0,2}", 0..7), 1..4)
}

proptest! {
    #[test]
    fn paste_then_undo_restores_table(
        (table, row, col) in table_strategy().prop_flat_map(|t| {
            let (rows, cols) = t.dimensions();
            (Just(t), 0..=rows, 0..cols)
        }),
        rows in payload_strategy(),
    ) {
        let original = table.clone();
        let mut table = table;
        let mut cmd = PasteCommand::new(row, col, ClipboardPayload::new(rows));

        cmd.apply(&mut table, UndoCheck::Strict).unwrap();
        cmd.reverse(&mut table, UndoCheck::Strict).unwrap();
        prop_assert_eq!(&table, &original);
    }

    #[test]
    fn redo_after_undo_reproduces_paste(
        (table, row, col) in table_strategy().prop_flat_map(|t| {
            let (rows, cols) = t.dimensions();
            (Just(t), 0..=rows, 0..cols)
        }),
        rows in payload_strategy(),
    ) {
        let mut table = table;
        let mut history = UndoStack::new();
        let payload = ClipboardPayload::new(rows);
        let pasted = history.push_paste(&mut table, row, col, payload).unwrap();
        let after = table.clone();

        if pasted {
            prop_assert!(history.undo(&mut table).unwrap());
            prop_assert!(history.redo(&mut table).unwrap());
        }
        prop_assert_eq!(&table, &after);
    }

    #[test]
    fn single_row_paste_appends_exactly_the_missing_rows(
        (table, row, col) in table_strategy().prop_flat_map(|t| {
            let (rows, cols) = t.dimensions();
            (Just(t), 0..=rows, 0..cols)
        }),
        cells in prop::collection::vec("[x-z]{1,2}", 1..12),
    ) {
        let mut table = table;
        let (row_count, col_count) = table.dimensions();
        let missing = (cells.len() + col).saturating_sub((row_count - row) * col_count);
        let expected = (missing + col_count - 1) / col_count;
        prop_assert_eq!(rows_needed(row, col, row_count, col_count, cells.len()), expected);

        let mut cmd = PasteCommand::new(row, col, ClipboardPayload::new(vec![cells]));
        cmd.apply(&mut table, UndoCheck::Strict).unwrap();
        prop_assert_eq!(table.row_count(), row_count + expected);
        prop_assert_eq!(cmd.rows_created(), expected);
    }

    #[test]
    fn full_width_rows_append_one_row_per_missing_row(
        (table, row) in table_strategy().prop_flat_map(|t| {
            let rows = t.row_count();
            (Just(t), 0..=rows)
        }),
        height in 1usize..5,
    ) {
        let mut table = table;
        let (row_count, col_count) = table.dimensions();
        let rows: Vec<Vec<String>> = (0..height)
            .map(|r| (0..col_count).map(|c| format!("{}:{}", r, c)).collect())
            .collect();

        let mut cmd = PasteCommand::new(row, 0, ClipboardPayload::new(rows));
        cmd.apply(&mut table, UndoCheck::Strict).unwrap();

        let expected = (row + height).saturating_sub(row_count);
        prop_assert_eq!(table.row_count(), row_count + expected);
        let last = format!("{}:{}", height - 1, col_count - 1);
        prop_assert_eq!(table.get(row + height - 1, col_count - 1), Some(last.as_str()));
    }
}
