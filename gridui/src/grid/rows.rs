//! Row operations.
//!
//! Every mutation writes the row store. Live grids additionally patch the
//! document, unless a rebuild batch is open: then the document is left alone
//! until [`Grid::end_rebuild`] renders all rows in one pass.

use log::{debug, warn};
use serde_json::Value;

use super::Grid;
use crate::error::GridError;
use crate::events::{SelectionChangedEvent, SelectionChangingEvent};
use crate::render::Renderer;
use crate::row_store::RowData;

impl Grid {
    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.read().row_count()
    }

    /// Cell texts of row `index`. Line endings come back as `\n`, since
    /// rows normalize `\r\n` and lone `\r` on the way in.
    pub fn get_texts(&self, index: usize) -> Result<Vec<String>, GridError> {
        let inner = self.read();
        GridError::check_index(index, inner.row_count())?;
        if !inner.rebuilding {
            if let Some(texts) = inner.backend.row_texts(index) {
                return Ok(texts);
            }
        }
        Ok(inner.store.get(index)?.cells.clone())
    }

    /// Payload of row `index`.
    pub fn get_data(&self, index: usize) -> Result<Option<Value>, GridError> {
        let inner = self.read();
        GridError::check_index(index, inner.row_count())?;
        Ok(inner.store.get(index)?.payload.clone())
    }

    /// Insert a row at `index`; `index == num_rows()` appends.
    ///
    /// A selection at or after `index` moves down with its row.
    pub fn insert_item<S: Into<String>>(
        &self,
        index: usize,
        cells: impl IntoIterator<Item = S>,
        payload: Option<Value>,
    ) -> Result<(), GridError> {
        let mut inner = self.write();
        let len = inner.row_count();
        if index > len {
            return Err(GridError::index(index, len));
        }

        let row = RowData::new(cells, payload);
        if !inner.rebuilding && inner.backend.is_live() {
            let markup =
                Renderer::new(&inner.config.columns).render_row(&row.cells, index % 2 == 0, false, None);
            let wiring = inner.wiring();
            inner.backend.insert_row(index, &markup, wiring)?;
            inner.backend.toggle_parity_from(index + 1)?;
        }
        inner.store.insert(index, row)?;

        if let Some(selected) = inner.config.selected_row_index {
            if selected >= index {
                inner.config.selected_row_index = Some(selected + 1);
            }
        }
        Ok(())
    }

    /// Append a row.
    pub fn add_item<S: Into<String>>(
        &self,
        cells: impl IntoIterator<Item = S>,
        payload: Option<Value>,
    ) -> Result<(), GridError> {
        let len = self.num_rows();
        self.insert_item(len, cells, payload)
    }

    /// Replace the texts and payload of row `index` in place.
    pub fn update_item<S: Into<String>>(
        &self,
        index: usize,
        cells: impl IntoIterator<Item = S>,
        payload: Option<Value>,
    ) -> Result<(), GridError> {
        let mut inner = self.write();
        GridError::check_index(index, inner.row_count())?;
        let row = RowData::new(cells, payload);
        if !inner.rebuilding {
            inner.backend.update_row(index, &row.cells)?;
        }
        inner.store.update(index, row)?;
        Ok(())
    }

    /// Remove row `index`.
    ///
    /// When the removed row was selected, the selection moves to the row now
    /// at `index`, or the new last row, or nowhere if the grid is empty. That
    /// move goes through the usual changing/changed notifications with the
    /// removed index as the old selection. Deleting the selected row also
    /// ends any drag of it.
    pub fn delete_item(&self, index: usize) -> Result<(), GridError> {
        let was_selected = {
            let mut inner = self.write();
            GridError::check_index(index, inner.row_count())?;
            if !inner.rebuilding {
                inner.backend.remove_row(index)?;
                inner.backend.toggle_parity_from(index)?;
            }
            inner.store.remove(index)?;

            match inner.config.selected_row_index {
                Some(selected) if selected == index => {
                    inner.config.selected_row_index = None;
                    inner.end_drag()?;
                    true
                }
                Some(selected) if selected > index => {
                    inner.config.selected_row_index = Some(selected - 1);
                    false
                }
                _ => false,
            }
        };

        if was_selected {
            let len = self.num_rows();
            let next = if len == 0 { None } else { Some(index.min(len - 1)) };
            let mut changing = SelectionChangingEvent {
                old_index: Some(index),
                new_index: next,
                cancel: false,
            };
            self.fire(|h| h.selection_changing.clone(), &mut changing);
            if changing.cancel {
                debug!("reselection after deleting row {index} vetoed");
            } else {
                self.apply_selection(next)?;
            }
            let mut changed = SelectionChangedEvent {
                index: self.selected_index(),
            };
            self.fire(|h| h.selection_changed.clone(), &mut changed);
        }
        Ok(())
    }

    /// Remove all rows. Fires selection-changed if a row was selected.
    pub fn clear(&self) -> Result<(), GridError> {
        let had_selection = {
            let mut inner = self.write();
            if !inner.rebuilding {
                inner.backend.clear_rows()?;
            }
            inner.store.clear();
            inner.end_drag()?;
            inner.config.selected_row_index.take().is_some()
        };

        if had_selection {
            self.fire(
                |h| h.selection_changed.clone(),
                &mut SelectionChangedEvent { index: None },
            );
        }
        Ok(())
    }

    /// Clear the grid and open a rebuild batch.
    ///
    /// Until [`end_rebuild`](Self::end_rebuild), row operations only touch
    /// the row store. Batches do not nest.
    pub fn begin_rebuild(&self) -> Result<(), GridError> {
        self.clear()?;
        self.write().rebuilding = true;
        debug!("rebuild started");
        Ok(())
    }

    /// Close the rebuild batch, rendering every buffered row at once.
    pub fn end_rebuild(&self) -> Result<(), GridError> {
        let mut inner = self.write();
        if !inner.rebuilding {
            warn!("end_rebuild called without begin_rebuild");
            return Ok(());
        }
        inner.rebuilding = false;

        if inner.backend.is_live() {
            let markup = Renderer::new(&inner.config.columns)
                .render_rows(&inner.store, inner.config.selected_row_index);
            let wiring = inner.wiring();
            inner.backend.replace_rows(&markup, wiring)?;
            if let Some(selected) = inner.config.selected_row_index {
                inner.backend.ensure_visible(selected)?;
            }
        }
        debug!("rebuild finished with {} rows", inner.store.len());
        Ok(())
    }

    /// Run `f` inside a rebuild batch.
    pub fn rebuild<R>(&self, f: impl FnOnce(&Grid) -> R) -> Result<R, GridError> {
        self.begin_rebuild()?;
        let result = f(self);
        self.end_rebuild()?;
        Ok(result)
    }
}
