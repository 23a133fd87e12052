mod common;

use common::{
    GRID_ID, assert_parity, dom_names, dom_rows, live_grid, row_y, server_grid, three_columns,
};
use griddom::Event;
use gridui::{DropTarget, EventResult, Grid};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn drag(grid: &Grid, from_y: i32, to_y: i32) -> EventResult {
    assert_eq!(
        grid.handle_event(&Event::DragStart { x: 10, y: from_y }).unwrap(),
        EventResult::StartDrag
    );
    grid.handle_event(&Event::Drag { x: 10, y: to_y }).unwrap();
    grid.handle_event(&Event::Release { x: 10, y: to_y }).unwrap()
}

fn record_drops(grid: &Grid) -> Arc<Mutex<Vec<(usize, usize)>>> {
    let drops = Arc::new(Mutex::new(Vec::new()));
    let seen = drops.clone();
    grid.on_drag_drop_completed(move |_, e| seen.lock().unwrap().push((e.item_index, e.drop_index)));
    drops
}

// ============================================================================
// Pointer Drags
// ============================================================================

#[test]
fn test_drop_on_later_row_lands_before_it() {
    let (grid, doc) = live_grid(three_columns().drag_drop(true), &["A", "B", "C"]);
    let drops = record_drops(&grid);
    grid.set_selected_index(Some(0)).unwrap();

    assert_eq!(drag(&grid, row_y(0), row_y(2)), EventResult::Consumed);
    assert_eq!(dom_names(&doc), ["B1", "A1", "C1"]);
    assert_eq!(*drops.lock().unwrap(), [(0, 1)]);
    assert_eq!(grid.selected_index(), Some(1));
    assert_eq!(grid.get_data(1).unwrap(), Some(serde_json::json!({ "name": "A" })));
    assert_parity(&doc);
    assert_eq!(doc.read().unwrap().focused_id(), Some(GRID_ID));
}

#[test]
fn test_drag_marks_rows_until_release() {
    let (grid, doc) = live_grid(three_columns().drag_drop(true), &["A", "B", "C"]);
    grid.set_selected_index(Some(1)).unwrap();
    grid.handle_event(&Event::DragStart { x: 10, y: row_y(1) }).unwrap();
    grid.handle_event(&Event::Drag { x: 10, y: row_y(0) }).unwrap();

    let rows = dom_rows(&doc);
    assert!(rows[1].has_class("CurrentDraggingRow"));
    assert!(rows[0].has_class("DropHover"));

    grid.handle_event(&Event::Release { x: 10, y: row_y(0) }).unwrap();
    assert_eq!(dom_names(&doc), ["B1", "A1", "C1"]);
    assert!(dom_rows(&doc)
        .iter()
        .all(|tr| !tr.has_class("DropHover") && !tr.has_class("CurrentDraggingRow")));
}

#[test]
fn test_drop_below_rows_moves_to_end() {
    let (grid, doc) = live_grid(three_columns().drag_drop(true), &["A", "B", "C"]);
    grid.set_selected_index(Some(0)).unwrap();
    drag(&grid, row_y(0), 90);
    assert_eq!(dom_names(&doc), ["B1", "C1", "A1"]);
    assert_eq!(grid.selected_index(), Some(2));
    assert_parity(&doc);
}

#[test]
fn test_release_outside_cancels() {
    let (grid, doc) = live_grid(three_columns().drag_drop(true), &["A", "B", "C"]);
    let drops = record_drops(&grid);
    grid.set_selected_index(Some(0)).unwrap();

    drag(&grid, row_y(0), 400);
    drag(&grid, row_y(0), 5);
    assert_eq!(dom_names(&doc), ["A1", "B1", "C1"]);
    assert!(drops.lock().unwrap().is_empty());
}

#[test]
fn test_drop_in_place_does_nothing() {
    let (grid, doc) = live_grid(three_columns().drag_drop(true), &["A", "B"]);
    let drops = record_drops(&grid);
    grid.set_selected_index(Some(0)).unwrap();
    drag(&grid, row_y(0), row_y(1));
    assert_eq!(dom_names(&doc), ["A1", "B1"]);
    assert!(drops.lock().unwrap().is_empty());
}

#[test]
fn test_vetoed_drop_keeps_order() {
    let (grid, doc) = live_grid(three_columns().drag_drop(true), &["A", "B", "C"]);
    let drops = record_drops(&grid);
    let completing = Arc::new(Mutex::new(Vec::new()));
    let seen = completing.clone();
    grid.on_drag_drop_completing(move |_, e| {
        seen.lock().unwrap().push((e.item_index, e.drop_index));
        e.cancel = true;
    });
    grid.set_selected_index(Some(2)).unwrap();

    drag(&grid, row_y(2), row_y(0));
    assert_eq!(*completing.lock().unwrap(), [(2, 0)]);
    assert!(drops.lock().unwrap().is_empty());
    assert_eq!(dom_names(&doc), ["A1", "B1", "C1"]);
    assert_eq!(grid.selected_index(), Some(2));
}

#[test]
fn test_drop_does_not_fire_selection_notifications() {
    let (grid, _doc) = live_grid(three_columns().drag_drop(true), &["A", "B", "C"]);
    grid.set_selected_index(Some(2)).unwrap();
    let log = common::record_selection(&grid);
    drag(&grid, row_y(2), row_y(0));
    assert_eq!(grid.selected_index(), Some(0));
    assert!(common::entries(&log).is_empty());
}

// ============================================================================
// Gating
// ============================================================================

#[test]
fn test_drag_needs_selected_row() {
    let (grid, _doc) = live_grid(three_columns().drag_drop(true), &["A", "B"]);
    let start = Event::DragStart { x: 10, y: row_y(0) };
    assert_eq!(grid.handle_event(&start).unwrap(), EventResult::Ignored);

    grid.set_selected_index(Some(1)).unwrap();
    assert_eq!(grid.handle_event(&start).unwrap(), EventResult::Ignored);
}

#[test]
fn test_drag_disabled() {
    let (grid, doc) = live_grid(three_columns(), &["A", "B"]);
    grid.set_selected_index(Some(0)).unwrap();
    let start = Event::DragStart { x: 10, y: row_y(0) };
    assert_eq!(grid.handle_event(&start).unwrap(), EventResult::Ignored);
    assert!(!dom_rows(&doc)[0].draggable);

    grid.set_enable_drag_drop(true).unwrap();
    assert!(dom_rows(&doc)[0].draggable);
    assert_eq!(grid.handle_event(&start).unwrap(), EventResult::StartDrag);
}

#[test]
fn test_disabling_grid_ends_drag() {
    let (grid, doc) = live_grid(three_columns().drag_drop(true), &["A", "B"]);
    grid.set_selected_index(Some(0)).unwrap();
    grid.handle_event(&Event::DragStart { x: 10, y: row_y(0) }).unwrap();
    grid.set_enabled(false).unwrap();

    let release = Event::Release { x: 10, y: row_y(1) };
    assert_eq!(grid.handle_event(&release).unwrap(), EventResult::Ignored);
    assert_eq!(dom_names(&doc), ["A1", "B1"]);
    assert!(!dom_rows(&doc)[0].draggable);
}

#[test]
fn test_programmatic_drop_on_headless_grid() {
    let grid = server_grid(three_columns().drag_drop(true), &["A", "B", "C"]);
    grid.set_selected_index(Some(0)).unwrap();
    grid.drop_selected(0, DropTarget::ValuesArea).unwrap();
    assert_eq!(grid.get_texts(2).unwrap(), common::cells("A"));
    assert_eq!(grid.selected_index(), Some(2));
}

#[test]
fn test_deleting_dragged_row_ends_drag() {
    let (grid, doc) = live_grid(three_columns().drag_drop(true), &["A", "B", "C"]);
    let drops = record_drops(&grid);
    grid.set_selected_index(Some(1)).unwrap();
    grid.handle_event(&Event::DragStart { x: 10, y: row_y(1) }).unwrap();
    grid.handle_event(&Event::Drag { x: 10, y: row_y(0) }).unwrap();
    grid.delete_item(1).unwrap();

    assert_eq!(grid.selected_index(), Some(1));
    assert!(dom_rows(&doc)
        .iter()
        .all(|tr| !tr.has_class("DropHover") && !tr.has_class("CurrentDraggingRow")));

    let release = Event::Release { x: 10, y: row_y(0) };
    assert_eq!(grid.handle_event(&release).unwrap(), EventResult::Ignored);
    assert_eq!(dom_names(&doc), ["A1", "C1"]);
    assert_eq!(grid.selected_index(), Some(1));
    assert!(drops.lock().unwrap().is_empty());
}

#[test]
fn test_moving_selection_mid_drag_ends_drag() {
    let (grid, doc) = live_grid(three_columns().drag_drop(true), &["A", "B", "C"]);
    let drops = record_drops(&grid);
    grid.set_selected_index(Some(1)).unwrap();
    grid.handle_event(&Event::DragStart { x: 10, y: row_y(1) }).unwrap();
    grid.on_key(40).unwrap();
    assert_eq!(grid.selected_index(), Some(2));
    assert!(!dom_rows(&doc)[1].has_class("CurrentDraggingRow"));

    let release = Event::Release { x: 10, y: row_y(0) };
    assert_eq!(grid.handle_event(&release).unwrap(), EventResult::Ignored);
    assert_eq!(dom_names(&doc), ["A1", "B1", "C1"]);
    assert!(drops.lock().unwrap().is_empty());
}

#[test]
fn test_deleting_other_row_keeps_drag() {
    let (grid, doc) = live_grid(three_columns().drag_drop(true), &["A", "B", "C"]);
    grid.set_selected_index(Some(2)).unwrap();
    grid.handle_event(&Event::DragStart { x: 10, y: row_y(2) }).unwrap();
    grid.delete_item(0).unwrap();

    assert_eq!(grid.selected_index(), Some(1));
    let release = Event::Release { x: 10, y: row_y(0) };
    assert_eq!(grid.handle_event(&release).unwrap(), EventResult::Consumed);
    assert_eq!(dom_names(&doc), ["C1", "B1"]);
    assert_eq!(grid.selected_index(), Some(0));
}
