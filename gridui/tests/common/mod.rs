#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use griddom::{Document, Element, SharedDocument};
use gridui::{Column, Grid, GridConfig};
use serde_json::json;

pub const GRID_ID: &str = "g";

/// Pixel y of the middle of body row `row` with default metrics: a 20px
/// header followed by 20px rows.
pub fn row_y(row: usize) -> i32 {
    20 + 20 * row as i32 + 5
}

pub fn three_columns() -> GridConfig {
    GridConfig::new().columns([
        Column::new("First", 100),
        Column::new("Second", 100),
        Column::new("", 100).class("num"),
    ])
}

/// Server-side grid holding one row per name, cells `<name>1..<name>3`.
pub fn server_grid(config: GridConfig, names: &[&str]) -> Grid {
    let grid = Grid::from_config(config).unwrap();
    grid.set_id(GRID_ID).unwrap();
    for name in names {
        grid.add_item(cells(name), Some(json!({ "name": name })))
            .unwrap();
    }
    grid
}

pub fn cells(name: &str) -> Vec<String> {
    (1..=3).map(|i| format!("{name}{i}")).collect()
}

/// Render on the "server" and hydrate into a fresh document.
pub fn live_grid(config: GridConfig, names: &[&str]) -> (Grid, SharedDocument) {
    let html = server_grid(config, names).render().unwrap();
    let doc = Document::parse(&html).into_shared();
    let grid = Grid::hydrate(doc.clone(), GRID_ID).unwrap();
    (grid, doc)
}

pub fn root(doc: &SharedDocument) -> Element {
    doc.read().unwrap().get(GRID_ID).unwrap().clone()
}

pub fn header_div(doc: &SharedDocument) -> Element {
    root(doc).child_nodes()[0].clone()
}

pub fn values_div(doc: &SharedDocument) -> Element {
    root(doc).child_nodes()[1].clone()
}

/// Body rows as currently present in the document.
pub fn dom_rows(doc: &SharedDocument) -> Vec<Element> {
    let values = values_div(doc);
    values.child_nodes()[0].child_nodes()[0].child_nodes().to_vec()
}

/// First cell text of every body row.
pub fn dom_names(doc: &SharedDocument) -> Vec<String> {
    dom_rows(doc)
        .iter()
        .map(|tr| tr.child_nodes()[0].text_content())
        .collect()
}

/// Check striping: even rows carry only the even class, odd rows only the
/// odd class.
pub fn assert_parity(doc: &SharedDocument) {
    for (index, tr) in dom_rows(doc).iter().enumerate() {
        let even = index % 2 == 0;
        assert_eq!(tr.has_class("GridRowEven"), even, "row {index}: {:?}", tr.classes);
        assert_eq!(tr.has_class("GridRowOdd"), !even, "row {index}: {:?}", tr.classes);
    }
}

/// Indices of rows carrying the selection highlight.
pub fn highlighted(doc: &SharedDocument) -> Vec<usize> {
    dom_rows(doc)
        .iter()
        .enumerate()
        .filter(|(_, tr)| tr.has_class("ui-state-highlight"))
        .map(|(i, _)| i)
        .collect()
}

/// Shared log of notifications, for asserting order and count.
pub type Log = Arc<Mutex<Vec<String>>>;

pub fn record_selection(grid: &Grid) -> Log {
    let log: Log = Arc::default();
    let changing = log.clone();
    grid.on_selection_changing(move |_, e| {
        changing
            .lock()
            .unwrap()
            .push(format!("changing {:?}->{:?}", e.old_index, e.new_index));
    });
    let changed = log.clone();
    grid.on_selection_changed(move |_, e| {
        changed.lock().unwrap().push(format!("changed {:?}", e.index));
    });
    log
}

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}
