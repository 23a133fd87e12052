//! Two-phase selection.

use log::debug;

use super::{Grid, GridInner};
use crate::error::GridError;
use crate::events::{SelectionChangedEvent, SelectionChangingEvent};
use crate::render::SELECTED_ROW_CLASS;

impl Grid {
    /// Currently selected row.
    pub fn selected_index(&self) -> Option<usize> {
        self.read().config.selected_row_index
    }

    /// Select row `index`, or clear the selection with None.
    ///
    /// Observers of selection-changing can veto the change, in which case
    /// nothing else happens. Otherwise the highlight moves, the row is
    /// scrolled into view and selection-changed fires. Selecting the current
    /// row does nothing at all.
    pub fn set_selected_index(&self, index: Option<usize>) -> Result<(), GridError> {
        let old = {
            let inner = self.read();
            if let Some(index) = index {
                GridError::check_index(index, inner.row_count())?;
            }
            inner.config.selected_row_index
        };
        if old == index {
            return Ok(());
        }

        let mut changing = SelectionChangingEvent {
            old_index: old,
            new_index: index,
            cancel: false,
        };
        self.fire(|h| h.selection_changing.clone(), &mut changing);
        if changing.cancel {
            debug!("selection change {old:?} -> {index:?} vetoed");
            return Ok(());
        }

        self.apply_selection(index)?;
        let mut changed = SelectionChangedEvent {
            index: self.selected_index(),
        };
        self.fire(|h| h.selection_changed.clone(), &mut changed);
        Ok(())
    }

    /// Scroll the values block just enough to show row `index`.
    pub fn ensure_visible(&self, index: usize) -> Result<(), GridError> {
        let mut inner = self.write();
        GridError::check_index(index, inner.row_count())?;
        if inner.rebuilding {
            return Ok(());
        }
        inner.backend.ensure_visible(index)
    }

    /// Commit a selection that has passed the changing phase. Rows may have
    /// moved while observers ran, so the index is checked again.
    pub(super) fn apply_selection(&self, index: Option<usize>) -> Result<(), GridError> {
        let mut inner = self.write();
        if let Some(index) = index {
            GridError::check_index(index, inner.row_count())?;
        }
        let old = inner.config.selected_row_index;
        inner.config.selected_row_index = index;
        if old != index {
            inner.end_drag()?;
        }
        if !inner.rebuilding {
            inner.show_selection(old, index)?;
        }
        debug!("selected row {index:?}");
        Ok(())
    }
}

impl GridInner {
    /// Move highlight and drag affordance from `old` to `new`.
    pub(super) fn show_selection(
        &mut self,
        old: Option<usize>,
        new: Option<usize>,
    ) -> Result<(), GridError> {
        let drag = self.drag_active();
        if let Some(old) = old.filter(|&old| old < self.row_count()) {
            self.backend.set_row_class(old, SELECTED_ROW_CLASS, false)?;
            self.backend.set_row_draggable(old, false)?;
        }
        if let Some(new) = new {
            self.backend.ensure_visible(new)?;
            self.backend.set_row_class(new, SELECTED_ROW_CLASS, true)?;
            if drag {
                self.backend.set_row_draggable(new, true)?;
            }
        }
        Ok(())
    }
}
