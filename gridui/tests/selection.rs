mod common;

use common::{dom_rows, entries, highlighted, live_grid, record_selection, three_columns};
use gridui::GridError;
use pretty_assertions::assert_eq;

#[test]
fn test_select_moves_highlight() {
    let (grid, doc) = live_grid(three_columns(), &["A", "B", "C"]);
    let log = record_selection(&grid);

    grid.set_selected_index(Some(0)).unwrap();
    grid.set_selected_index(Some(2)).unwrap();
    assert_eq!(highlighted(&doc), [2]);
    assert_eq!(
        entries(&log),
        [
            "changing None->Some(0)",
            "changed Some(0)",
            "changing Some(0)->Some(2)",
            "changed Some(2)",
        ]
    );

    grid.set_selected_index(None).unwrap();
    assert!(highlighted(&doc).is_empty());
}

#[test]
fn test_reselecting_same_row_is_silent() {
    let (grid, _doc) = live_grid(three_columns(), &["A", "B"]);
    let log = record_selection(&grid);
    grid.set_selected_index(Some(1)).unwrap();
    grid.set_selected_index(Some(1)).unwrap();
    assert_eq!(entries(&log), ["changing None->Some(1)", "changed Some(1)"]);
}

#[test]
fn test_veto_leaves_state_untouched() {
    let (grid, doc) = live_grid(three_columns().drag_drop(true), &["A", "B", "C"]);
    grid.set_selected_index(Some(0)).unwrap();
    let log = record_selection(&grid);
    grid.on_selection_changing(|_, e| e.cancel = e.new_index == Some(2));

    grid.set_selected_index(Some(2)).unwrap();
    assert_eq!(grid.selected_index(), Some(0));
    assert_eq!(highlighted(&doc), [0]);
    let rows = dom_rows(&doc);
    assert!(rows[0].draggable);
    assert!(!rows[2].draggable);
    assert_eq!(entries(&log), ["changing Some(0)->Some(2)"]);

    grid.set_selected_index(Some(1)).unwrap();
    assert_eq!(grid.selected_index(), Some(1));
}

#[test]
fn test_out_of_range_selection_fires_nothing() {
    let (grid, doc) = live_grid(three_columns(), &["A"]);
    let log = record_selection(&grid);
    assert_eq!(
        grid.set_selected_index(Some(1)),
        Err(GridError::Index { index: 1, len: 1 })
    );
    assert!(entries(&log).is_empty());
    assert!(highlighted(&doc).is_empty());
}

#[test]
fn test_draggable_follows_selection() {
    let (grid, doc) = live_grid(three_columns().drag_drop(true), &["A", "B"]);
    grid.set_selected_index(Some(0)).unwrap();
    grid.set_selected_index(Some(1)).unwrap();
    let rows = dom_rows(&doc);
    assert!(!rows[0].draggable);
    assert!(rows[1].draggable);

    grid.set_enable_drag_drop(false).unwrap();
    assert!(!dom_rows(&doc)[1].draggable);
}

#[test]
fn test_changing_handler_sees_old_selection() {
    let (grid, _doc) = live_grid(three_columns(), &["A", "B"]);
    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let inner = seen.clone();
    grid.on_selection_changing(move |g, _| inner.lock().unwrap().push(g.selected_index()));
    grid.set_selected_index(Some(0)).unwrap();
    grid.set_selected_index(Some(1)).unwrap();
    assert_eq!(*seen.lock().unwrap(), [None, Some(0)]);
}

#[test]
fn test_handler_may_redirect_selection() {
    let (grid, doc) = live_grid(three_columns(), &["A", "B", "C"]);
    grid.on_selection_changed(|g, e| {
        if e.index == Some(1) {
            g.set_selected_index(Some(2)).unwrap();
        }
    });
    grid.set_selected_index(Some(1)).unwrap();
    assert_eq!(grid.selected_index(), Some(2));
    assert_eq!(highlighted(&doc), [2]);
}
