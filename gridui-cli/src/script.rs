//! Scripted client interactions replayed against a hydrated grid.
//!
//! A script is a JSON array of steps, each tagged by `action`:
//!
//! ```json
//! [
//!   { "action": "click", "x": 10, "y": 25 },
//!   { "action": "key", "code": 40 },
//!   { "action": "drag", "fromY": 25, "toY": 65 },
//!   { "action": "delete", "index": 0 }
//! ]
//! ```
//!
//! Pointer coordinates are relative to the grid's root element.

use griddom::{Event, Key, MouseButton};
use gridui::{EventResult, Grid, GridError};
use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Step {
    Click {
        x: i32,
        y: i32,
    },
    Key {
        code: u32,
    },
    #[serde(rename_all = "camelCase")]
    Drag {
        #[serde(default = "drag_x")]
        x: i32,
        from_y: i32,
        to_y: i32,
    },
    Scroll {
        #[serde(default)]
        x: u32,
        #[serde(default)]
        y: u32,
    },
    Resize {
        column: usize,
        width: f64,
    },
    Select {
        index: Option<usize>,
    },
    Insert {
        index: usize,
        cells: Vec<String>,
        #[serde(default)]
        data: Option<Value>,
    },
    Update {
        index: usize,
        cells: Vec<String>,
        #[serde(default)]
        data: Option<Value>,
    },
    Delete {
        index: usize,
    },
    Clear,
}

fn drag_x() -> i32 {
    5
}

pub fn parse_script(json: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Run every step in order, stopping at the first error.
pub fn replay(grid: &Grid, steps: &[Step]) -> Result<(), GridError> {
    for (n, step) in steps.iter().enumerate() {
        debug!("step {n}: {step:?}");
        let result = run_step(grid, step)?;
        if !result.is_handled() {
            info!("step {n} was ignored by the grid");
        }
    }
    Ok(())
}

fn run_step(grid: &Grid, step: &Step) -> Result<EventResult, GridError> {
    match step {
        Step::Click { x, y } => grid.handle_event(&Event::Click {
            x: *x,
            y: *y,
            button: MouseButton::Left,
        }),
        Step::Key { code } => match Key::from_key_code(*code) {
            Some(key) => grid.handle_event(&Event::Key { key }),
            None => grid.on_key(*code),
        },
        Step::Drag { x, from_y, to_y } => {
            let started = grid.handle_event(&Event::DragStart { x: *x, y: *from_y })?;
            if started != EventResult::StartDrag {
                return Ok(EventResult::Ignored);
            }
            grid.handle_event(&Event::Drag { x: *x, y: *to_y })?;
            grid.handle_event(&Event::Release { x: *x, y: *to_y })
        }
        Step::Scroll { x, y } => grid.handle_event(&Event::Scroll { x: *x, y: *y }),
        Step::Resize { column, width } => grid.handle_event(&Event::ResizeStop {
            column: *column,
            width: *width,
        }),
        Step::Select { index } => {
            grid.set_selected_index(*index)?;
            Ok(EventResult::Consumed)
        }
        Step::Insert { index, cells, data } => {
            grid.insert_item(*index, cells.iter().cloned(), data.clone())?;
            Ok(EventResult::Consumed)
        }
        Step::Update { index, cells, data } => {
            grid.update_item(*index, cells.iter().cloned(), data.clone())?;
            Ok(EventResult::Consumed)
        }
        Step::Delete { index } => {
            grid.delete_item(*index)?;
            Ok(EventResult::Consumed)
        }
        Step::Clear => {
            grid.clear()?;
            Ok(EventResult::Consumed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use griddom::Document;
    use pretty_assertions::assert_eq;

    use crate::definition::GridDefinition;

    fn hydrated(json: &str) -> (Grid, griddom::SharedDocument) {
        let def = GridDefinition::from_json(json).unwrap();
        let html = def.build().unwrap().render().unwrap();
        let doc = Document::parse(&html).into_shared();
        (Grid::hydrate(doc.clone(), &def.id).unwrap(), doc)
    }

    const THREE_ROWS: &str = r#"{
        "id": "g",
        "columns": [{ "title": "Name" }],
        "rows": [{ "cells": ["A"] }, { "cells": ["B"] }, { "cells": ["C"] }],
        "dragDrop": true
    }"#;

    #[test]
    fn test_parse_steps() {
        let steps = parse_script(
            r#"[{ "action": "click", "x": 1, "y": 2 }, { "action": "drag", "fromY": 25, "toY": 65 }, { "action": "clear" }]"#,
        )
        .unwrap();
        assert_eq!(
            steps,
            [
                Step::Click { x: 1, y: 2 },
                Step::Drag {
                    x: 5,
                    from_y: 25,
                    to_y: 65
                },
                Step::Clear,
            ]
        );
    }

    #[test]
    fn test_replay_click_then_drag() {
        let (grid, _doc) = hydrated(THREE_ROWS);
        let steps = parse_script(
            r#"[{ "action": "click", "x": 10, "y": 25 }, { "action": "drag", "fromY": 25, "toY": 65 }]"#,
        )
        .unwrap();
        replay(&grid, &steps).unwrap();
        assert_eq!(grid.get_texts(1).unwrap(), ["A"]);
        assert_eq!(grid.selected_index(), Some(1));
    }

    #[test]
    fn test_replay_keys_and_row_edits() {
        let (grid, doc) = hydrated(THREE_ROWS);
        let steps = parse_script(
            r#"[
                { "action": "key", "code": 40 },
                { "action": "key", "code": 40 },
                { "action": "insert", "index": 0, "cells": ["Z"] },
                { "action": "delete", "index": 2 }
            ]"#,
        )
        .unwrap();
        replay(&grid, &steps).unwrap();
        assert_eq!(grid.num_rows(), 3);
        assert_eq!(grid.selected_index(), Some(2));
        assert_eq!(grid.get_texts(2).unwrap(), ["C"]);
        assert!(doc.read().unwrap().to_html().contains("ui-state-highlight"));
    }

    #[test]
    fn test_replay_key_without_variant_reaches_grid() {
        let (grid, _doc) = hydrated(THREE_ROWS);
        let codes = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = codes.clone();
        grid.on_key_press(move |_, e| seen.lock().unwrap().push(e.key_code));
        let steps = parse_script(r#"[{ "action": "key", "code": 13 }, { "action": "key", "code": 40 }]"#).unwrap();
        replay(&grid, &steps).unwrap();
        assert_eq!(*codes.lock().unwrap(), [13, 40]);
        assert_eq!(grid.selected_index(), Some(0));
    }

    #[test]
    fn test_replay_stops_on_error() {
        let (grid, _doc) = hydrated(THREE_ROWS);
        let steps = parse_script(r#"[{ "action": "delete", "index": 7 }, { "action": "clear" }]"#).unwrap();
        assert!(matches!(replay(&grid, &steps), Err(GridError::Index { .. })));
        assert_eq!(grid.num_rows(), 3);
    }
}
