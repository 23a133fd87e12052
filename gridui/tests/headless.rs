mod common;

use common::{cells, entries, record_selection, server_grid, three_columns};
use gridui::{Column, ControlRegistry, Grid, GridConfig, GridError, ScriptManager, SnapshotCodec};
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Rows
// ============================================================================

#[test]
fn test_insert_then_delete_shifts_rows() {
    let grid = server_grid(three_columns(), &["A", "B", "C"]);
    assert_eq!(grid.get_texts(1).unwrap(), cells("B"));

    grid.delete_item(0).unwrap();
    assert_eq!(grid.get_texts(0).unwrap(), cells("B"));
    assert_eq!(grid.num_rows(), 2);
}

#[test]
fn test_out_of_range_rows_are_index_errors() {
    let grid = server_grid(three_columns(), &["A"]);
    assert_eq!(
        grid.insert_item(2, ["x"], None),
        Err(GridError::Index { index: 2, len: 1 })
    );
    assert!(matches!(grid.get_texts(1), Err(GridError::Index { .. })));
    assert!(matches!(grid.update_item(1, ["x"], None), Err(GridError::Index { .. })));
    assert!(matches!(grid.delete_item(1), Err(GridError::Index { .. })));
    assert_eq!(grid.num_rows(), 1);
}

#[test]
fn test_payload_is_carried_untouched() {
    let grid = server_grid(three_columns(), &["A"]);
    assert_eq!(grid.get_data(0).unwrap(), Some(json!({ "name": "A" })));
    grid.update_item(0, ["z"], None).unwrap();
    assert_eq!(grid.get_data(0).unwrap(), None);
    assert_eq!(grid.get_texts(0).unwrap(), ["z"]);
}

#[test]
fn test_insert_before_selection_keeps_logical_row() {
    let grid = server_grid(three_columns(), &["A", "B"]);
    grid.set_selected_index(Some(1)).unwrap();
    let log = record_selection(&grid);

    grid.insert_item(0, cells("Z"), None).unwrap();
    assert_eq!(grid.selected_index(), Some(2));
    grid.insert_item(3, cells("Y"), None).unwrap();
    assert_eq!(grid.selected_index(), Some(2));
    assert!(entries(&log).is_empty());
}

#[test]
fn test_clear_notifies_only_when_selected() {
    let grid = server_grid(three_columns(), &["A", "B"]);
    let log = record_selection(&grid);
    grid.clear().unwrap();
    assert!(entries(&log).is_empty());

    grid.add_item(cells("A"), None).unwrap();
    grid.set_selected_index(Some(0)).unwrap();
    grid.clear().unwrap();
    assert_eq!(grid.num_rows(), 0);
    assert_eq!(grid.selected_index(), None);
    assert_eq!(
        entries(&log),
        ["changing None->Some(0)", "changed Some(0)", "changed None"]
    );
}

#[test]
fn test_rebuild_buffers_rows() {
    let grid = server_grid(three_columns(), &["old"]);
    let rows = grid
        .rebuild(|g| {
            for name in ["A", "B", "C", "D", "E"] {
                g.add_item(cells(name), None).unwrap();
            }
            g.num_rows()
        })
        .unwrap();
    assert_eq!(rows, 5);
    assert_eq!(grid.get_texts(4).unwrap(), cells("E"));
}

#[test]
fn test_end_rebuild_without_begin_is_tolerated() {
    let grid = server_grid(three_columns(), &["A"]);
    grid.end_rebuild().unwrap();
    assert_eq!(grid.num_rows(), 1);
}

// ============================================================================
// Deleting the Selection
// ============================================================================

#[test]
fn test_delete_selected_moves_to_next_row() {
    let grid = server_grid(three_columns(), &["A", "B", "C"]);
    grid.set_selected_index(Some(1)).unwrap();
    let log = record_selection(&grid);

    grid.delete_item(1).unwrap();
    assert_eq!(grid.selected_index(), Some(1));
    assert_eq!(grid.get_texts(1).unwrap(), cells("C"));
    assert_eq!(entries(&log), ["changing Some(1)->Some(1)", "changed Some(1)"]);
}

#[test]
fn test_delete_selected_last_row_moves_back() {
    let grid = server_grid(three_columns(), &["A", "B"]);
    grid.set_selected_index(Some(1)).unwrap();
    grid.delete_item(1).unwrap();
    assert_eq!(grid.selected_index(), Some(0));

    grid.delete_item(0).unwrap();
    assert_eq!(grid.selected_index(), None);
}

#[test]
fn test_vetoed_reselection_leaves_nothing_selected() {
    let grid = server_grid(three_columns(), &["A", "B", "C"]);
    grid.set_selected_index(Some(0)).unwrap();
    let log = record_selection(&grid);
    grid.on_selection_changing(|_, e| e.cancel = true);

    grid.delete_item(0).unwrap();
    assert_eq!(grid.selected_index(), None);
    assert_eq!(entries(&log), ["changing Some(0)->Some(0)", "changed None"]);
}

#[test]
fn test_delete_before_selection_shifts_it() {
    let grid = server_grid(three_columns(), &["A", "B", "C"]);
    grid.set_selected_index(Some(2)).unwrap();
    grid.delete_item(0).unwrap();
    assert_eq!(grid.selected_index(), Some(1));
    assert_eq!(grid.get_texts(1).unwrap(), cells("C"));
}

// ============================================================================
// Columns and Settings
// ============================================================================

#[test]
fn test_column_count_locked_while_rows_exist() {
    let grid = server_grid(three_columns(), &["A"]);
    assert!(matches!(grid.set_num_columns(4), Err(GridError::Configuration(_))));
    assert_eq!(grid.num_columns(), 3);

    grid.clear().unwrap();
    grid.set_num_columns(4).unwrap();
    assert_eq!(grid.column(3).unwrap(), Column::default());
}

#[test]
fn test_array_setters_adjust_column_count() {
    let grid = Grid::new();
    grid.set_column_titles(["a", "b"]).unwrap();
    grid.set_column_widths(&[40, 50]).unwrap();
    grid.set_column_classes(["x", ""]).unwrap();
    assert_eq!(grid.column_titles(), ["a", "b"]);
    assert_eq!(grid.column_widths(), [40, 50]);
    assert_eq!(grid.column_classes(), ["x", ""]);

    grid.set_column_widths(&[60]).unwrap();
    assert_eq!(grid.num_columns(), 1);
    assert_eq!(grid.column_title(0).unwrap(), "a");
}

#[test]
fn test_size_bounds() {
    let grid = Grid::new();
    assert!(matches!(grid.set_width(5), Err(GridError::Configuration(_))));
    assert!(matches!(grid.set_height(1001), Err(GridError::Configuration(_))));
    grid.set_width(10).unwrap();
    grid.set_height(1000).unwrap();
    assert_eq!((grid.width(), grid.height()), (10, 1000));
}

#[test]
fn test_from_config_rejects_selection() {
    let mut config = three_columns();
    config.num_rows = 1;
    config.selected_row_index = Some(0);
    assert!(matches!(Grid::from_config(config), Err(GridError::Index { .. })));
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_requires_id() {
    let grid = Grid::from_config(three_columns()).unwrap();
    assert!(matches!(grid.render(), Err(GridError::Configuration(_))));
}

#[test]
fn test_render_embeds_decodable_snapshot() {
    let grid = server_grid(three_columns().drag_drop(true), &["A", "B"]);
    grid.set_selected_index(Some(1)).unwrap();
    let html = grid.render().unwrap();

    let start = html.find("__cfg=\"").unwrap() + 7;
    let end = start + html[start..].find('"').unwrap();
    let config = SnapshotCodec::decode(&html[start..end]).unwrap();
    assert_eq!(config, grid.snapshot());
    assert_eq!(config.num_rows, 2);
    assert_eq!(config.selected_row_index, Some(1));
}

#[test]
fn test_render_marks_selected_row_and_payload() {
    let grid = server_grid(three_columns(), &["A", "B"]);
    grid.set_selected_index(Some(0)).unwrap();
    let html = grid.render().unwrap();
    assert!(html.contains("<tr __data=\"{&quot;name&quot;:&quot;A&quot;}\" class=\"GridRowEven ui-state-highlight\">"));
    assert!(html.contains("<tr __data=\"{&quot;name&quot;:&quot;B&quot;}\" class=\"GridRowOdd\">"));
}

#[test]
fn test_headless_grid_has_no_render_stats() {
    let grid = server_grid(three_columns(), &["A", "B"]);
    grid.delete_item(0).unwrap();
    assert!(!grid.is_attached());
    assert_eq!(grid.render_stats(), Default::default());
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_with_registry_registers_once() {
    let manager = ScriptManager::new();
    let _a = Grid::with_registry(&manager);
    let _b = Grid::with_registry(&manager);
    manager.register_type("Other");
    assert_eq!(manager.types(), ["Grid", "Other"]);
}

#[test]
fn test_defaults() {
    let grid = Grid::new();
    assert_eq!(grid.snapshot(), GridConfig::default());
    assert_eq!(grid.selected_index(), None);
    assert!(grid.enabled());
    assert!(grid.col_headers_visible());
    assert!(!grid.enable_drag_drop());
}
