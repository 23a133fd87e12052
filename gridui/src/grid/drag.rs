//! Drag reordering of the selected row.
//!
//! Only the selected row can be dragged, and only while drag-drop is enabled
//! on an enabled grid. Releasing over a row drops the dragged row in front
//! of it; releasing over the empty part of the values block moves it to the
//! end. Because the dragged row is taken out before it is reinserted, a
//! target after the original position is one less than the row it was
//! dropped on. A drag ends without a drop as soon as the selection leaves
//! the dragged row.

use log::{debug, warn};

use super::{Grid, GridInner, Hit};
use crate::error::GridError;
use crate::events::{DragDropCompletedEvent, DragDropCompletingEvent, EventResult};
use crate::render::{CURRENT_DRAGGING_ROW_CLASS, ROW_HOVER_CLASS};

/// Where a dragged row was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Over the row currently at this position.
    Row(usize),
    /// Over the values block but below every row.
    ValuesArea,
}

/// Final position of the selected row `selected` when dropped on `target`,
/// or None when the drop would not move it.
pub fn resolve_drop(selected: usize, target: DropTarget, rows: usize) -> Option<usize> {
    let to = match target {
        DropTarget::Row(row) if row > selected => row - 1,
        DropTarget::Row(row) => row,
        DropTarget::ValuesArea => rows.checked_sub(1)?,
    };
    (to != selected).then_some(to)
}

impl Grid {
    /// Start dragging if the pointer is on the selected row.
    pub(super) fn on_drag_start(&self, x: i32, y: i32) -> Result<EventResult, GridError> {
        let mut inner = self.write();
        if !inner.drag_active() {
            return Ok(EventResult::Ignored);
        }
        let Some(selected) = inner.config.selected_row_index else {
            return Ok(EventResult::Ignored);
        };
        match inner.backend.hit(x, y, &inner.widths()) {
            Hit::Row { row, .. } if row == selected => {
                inner.backend.set_row_class(row, CURRENT_DRAGGING_ROW_CLASS, true)?;
                inner.dragging = true;
                Ok(EventResult::StartDrag)
            }
            _ => Ok(EventResult::Ignored),
        }
    }

    /// Highlight the row under the pointer as a drop target.
    pub(super) fn on_drag(&self, x: i32, y: i32) -> Result<EventResult, GridError> {
        let mut inner = self.write();
        if !inner.dragging {
            return Ok(EventResult::Ignored);
        }
        inner.backend.clear_row_class(ROW_HOVER_CLASS)?;
        if let Hit::Row { row, .. } = inner.backend.hit(x, y, &inner.widths()) {
            inner.backend.set_row_class(row, ROW_HOVER_CLASS, true)?;
        }
        Ok(EventResult::Consumed)
    }

    /// Finish a drag. Releasing outside the grid cancels it.
    pub(super) fn on_release(&self, x: i32, y: i32) -> Result<EventResult, GridError> {
        let (selected, target) = {
            let mut inner = self.write();
            if !inner.dragging {
                return Ok(EventResult::Ignored);
            }
            inner.end_drag()?;

            let target = match inner.backend.hit(x, y, &inner.widths()) {
                Hit::Row { row, .. } => DropTarget::Row(row),
                Hit::ValuesArea => DropTarget::ValuesArea,
                Hit::Header { .. } | Hit::Outside => {
                    debug!("drag released outside the rows");
                    return Ok(EventResult::Consumed);
                }
            };
            (inner.config.selected_row_index, target)
        };

        if let Some(selected) = selected {
            self.drop_selected(selected, target)?;
        }
        Ok(EventResult::Consumed)
    }

    /// Drop the row dragged from `from` on `target`.
    ///
    /// Raises drag-drop-completing first; a veto abandons the drop. Otherwise
    /// the row is moved, the selection follows it without selection
    /// notifications, focus returns to the grid and drag-drop-completed
    /// fires.
    pub fn drop_selected(&self, from: usize, target: DropTarget) -> Result<(), GridError> {
        if !self.read().drag_active() {
            return Ok(());
        }
        let Some(to) = resolve_drop(from, target, self.num_rows()) else {
            return Ok(());
        };

        let mut completing = DragDropCompletingEvent {
            item_index: from,
            drop_index: to,
            cancel: false,
        };
        self.fire(|h| h.drag_drop_completing.clone(), &mut completing);
        if completing.cancel {
            debug!("drop of row {from} at {to} vetoed");
            return Ok(());
        }

        {
            let mut inner = self.write();
            if inner.config.selected_row_index != Some(from) {
                warn!("selection moved while completing a drop; drop abandoned");
                return Ok(());
            }
            GridError::check_index(to, inner.row_count())?;
            inner.store.move_row(from, to)?;
            if !inner.rebuilding {
                inner.backend.move_row(from, to)?;
                inner.backend.set_parity_range(from.min(to), from.max(to))?;
            }
            inner.config.selected_row_index = Some(to);
            inner.backend.focus()?;
        }
        debug!("moved row {from} to {to}");

        let mut completed = DragDropCompletedEvent {
            item_index: from,
            drop_index: to,
        };
        self.fire(|h| h.drag_drop_completed.clone(), &mut completed);
        Ok(())
    }
}

impl GridInner {
    /// Stop any drag in progress and drop its row highlights.
    pub(super) fn end_drag(&mut self) -> Result<(), GridError> {
        if !self.dragging {
            return Ok(());
        }
        self.dragging = false;
        self.backend.clear_row_class(ROW_HOVER_CLASS)?;
        self.backend.clear_row_class(CURRENT_DRAGGING_ROW_CLASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_after_original_is_renumbered() {
        assert_eq!(resolve_drop(0, DropTarget::Row(2), 3), Some(1));
        assert_eq!(resolve_drop(0, DropTarget::Row(1), 3), None);
    }

    #[test]
    fn test_drop_before_original_keeps_index() {
        assert_eq!(resolve_drop(2, DropTarget::Row(0), 3), Some(0));
        assert_eq!(resolve_drop(2, DropTarget::Row(2), 3), None);
    }

    #[test]
    fn test_drop_on_values_area_moves_to_end() {
        assert_eq!(resolve_drop(0, DropTarget::ValuesArea, 3), Some(2));
        assert_eq!(resolve_drop(2, DropTarget::ValuesArea, 3), None);
    }
}
