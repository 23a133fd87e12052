//! Pointer and keyboard input.

use griddom::{Event, Key, MouseButton};

use super::{Grid, Hit};
use crate::error::GridError;
use crate::events::{CellClickedEvent, EventResult, KeyPressEvent};

impl Grid {
    /// Dispatch an input event in grid-local pixel coordinates.
    pub fn handle_event(&self, event: &Event) -> Result<EventResult, GridError> {
        match event {
            Event::Key { key } => self.on_key(key.key_code()),
            Event::Click {
                x,
                y,
                button: MouseButton::Left,
            } => self.on_click(*x, *y),
            Event::Click { .. } => Ok(EventResult::Ignored),
            Event::DragStart { x, y } => self.on_drag_start(*x, *y),
            Event::Drag { x, y } => self.on_drag(*x, *y),
            Event::Release { x, y } => self.on_release(*x, *y),
            Event::Scroll { x, y } => self.on_scroll(*x, *y),
            Event::ResizeStop { column, width } => self.on_resize_stop(*column, *width),
        }
    }

    /// Handle a key press. Up and down move the selection within the row
    /// range; every key is first offered to key-press observers.
    pub fn on_key(&self, key_code: u32) -> Result<EventResult, GridError> {
        if !self.enabled() {
            return Ok(EventResult::Ignored);
        }

        let mut press = KeyPressEvent {
            key_code,
            prevent_default: false,
        };
        self.fire(|h| h.key_press.clone(), &mut press);
        if press.prevent_default {
            return Ok(EventResult::Consumed);
        }

        let rows = self.num_rows();
        let selected = self.selected_index();
        match Key::from_key_code(key_code) {
            Some(Key::Up) => {
                if let Some(index) = selected.filter(|&i| i > 0) {
                    self.set_selected_index(Some(index - 1))?;
                }
                Ok(EventResult::Consumed)
            }
            Some(Key::Down) => {
                let next = match selected {
                    None if rows > 0 => Some(0),
                    Some(index) if index + 1 < rows => Some(index + 1),
                    _ => None,
                };
                if next.is_some() {
                    self.set_selected_index(next)?;
                }
                Ok(EventResult::Consumed)
            }
            _ => Ok(EventResult::Ignored),
        }
    }

    /// Handle a click at grid-local coordinates.
    pub fn on_click(&self, x: i32, y: i32) -> Result<EventResult, GridError> {
        let hit = {
            let inner = self.read();
            if !inner.config.enabled {
                return Ok(EventResult::Ignored);
            }
            inner.backend.hit(x, y, &inner.widths())
        };
        match hit {
            Hit::Row { row, col } => self.on_row_click(row, col),
            _ => Ok(EventResult::Ignored),
        }
    }

    /// Handle a click on row `row`, over cell `col` if the pointer was inside
    /// one. Cell-clicked observers may keep the row from being selected.
    pub fn on_row_click(&self, row: usize, col: Option<usize>) -> Result<EventResult, GridError> {
        if !self.enabled() {
            return Ok(EventResult::Ignored);
        }

        let mut prevent_row_select = false;
        if let Some(col) = col {
            let mut clicked = CellClickedEvent {
                row,
                col,
                prevent_row_select: false,
            };
            self.fire(|h| h.cell_clicked.clone(), &mut clicked);
            prevent_row_select = clicked.prevent_row_select;
        }
        if !prevent_row_select {
            self.set_selected_index(Some(row))?;
        }
        Ok(EventResult::Consumed)
    }

    /// The values block scrolled; keep the header aligned with it.
    fn on_scroll(&self, x: u32, y: u32) -> Result<EventResult, GridError> {
        let mut inner = self.write();
        if !inner.backend.is_live() {
            return Ok(EventResult::Ignored);
        }
        inner.backend.scroll_values(x, y)?;
        Ok(EventResult::Consumed)
    }

    /// A header resize handle was released.
    fn on_resize_stop(&self, column: usize, width: f64) -> Result<EventResult, GridError> {
        if column >= self.num_columns() {
            return Ok(EventResult::Ignored);
        }
        self.set_column_width(column, width.round().max(0.0) as u32)?;
        Ok(EventResult::Consumed)
    }
}
