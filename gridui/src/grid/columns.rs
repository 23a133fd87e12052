//! Column metadata and appearance settings.

use log::debug;

use super::{Grid, GridInner};
use crate::config::{Column, MAX_SIZE, MIN_SIZE, resize_columns};
use crate::error::GridError;
use crate::render::Renderer;
use crate::row_store::RowStore;

fn check_size(what: &str, value: u32) -> Result<(), GridError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&value) {
        Ok(())
    } else {
        Err(GridError::configuration(format!(
            "{what} {value} outside {MIN_SIZE}..={MAX_SIZE}"
        )))
    }
}

impl GridInner {
    fn column_mut(&mut self, col: usize) -> Result<&mut Column, GridError> {
        let len = self.config.columns.len();
        self.config
            .columns
            .get_mut(col)
            .ok_or_else(|| GridError::index(col, len))
    }

    fn set_num_columns(&mut self, count: usize) -> Result<(), GridError> {
        if count == self.config.columns.len() {
            return Ok(());
        }
        if self.row_count() > 0 {
            return Err(GridError::configuration(
                "cannot change the number of columns while the grid has rows",
            ));
        }
        resize_columns(&mut self.config.columns, count);

        if self.backend.is_live() {
            let markup = Renderer::new(&self.config.columns).render_inner(
                self.config.width,
                self.config.col_headers_visible,
                &RowStore::new(),
                None,
            );
            let wiring = self.wiring();
            self.backend.replace_inner(&markup, wiring)?;
            self.backend
                .set_height(self.config.height, self.config.col_headers_visible)?;
        }
        debug!("grid '{}' now has {count} columns", self.id);
        Ok(())
    }
}

impl Grid {
    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    pub fn num_columns(&self) -> usize {
        self.read().config.columns.len()
    }

    /// Change the number of columns. Only allowed while the grid has no
    /// rows; new columns get default settings.
    pub fn set_num_columns(&self, count: usize) -> Result<(), GridError> {
        self.write().set_num_columns(count)
    }

    pub fn column(&self, col: usize) -> Result<Column, GridError> {
        let inner = self.read();
        inner
            .config
            .columns
            .get(col)
            .cloned()
            .ok_or_else(|| GridError::index(col, inner.config.columns.len()))
    }

    pub fn column_width(&self, col: usize) -> Result<u32, GridError> {
        Ok(self.column(col)?.width)
    }

    pub fn column_title(&self, col: usize) -> Result<String, GridError> {
        Ok(self.column(col)?.title)
    }

    pub fn column_class(&self, col: usize) -> Result<String, GridError> {
        Ok(self.column(col)?.class)
    }

    /// Resize column `col`, header and body cells alike.
    pub fn set_column_width(&self, col: usize, width: u32) -> Result<(), GridError> {
        let mut inner = self.write();
        inner.column_mut(col)?.width = width;
        inner.backend.set_column_width(col, width)
    }

    pub fn set_column_title(&self, col: usize, title: impl Into<String>) -> Result<(), GridError> {
        let title = title.into();
        let mut inner = self.write();
        inner.column_mut(col)?;
        inner.backend.set_column_title(col, &title)?;
        inner.column_mut(col)?.title = title;
        Ok(())
    }

    pub fn set_column_class(&self, col: usize, class: impl Into<String>) -> Result<(), GridError> {
        let class = class.into();
        let mut inner = self.write();
        let old = std::mem::replace(&mut inner.column_mut(col)?.class, class.clone());
        inner.backend.set_column_class(col, &old, &class)
    }

    pub fn column_titles(&self) -> Vec<String> {
        self.read().config.columns.iter().map(|c| c.title.clone()).collect()
    }

    pub fn column_widths(&self) -> Vec<u32> {
        self.read().widths()
    }

    pub fn column_classes(&self) -> Vec<String> {
        self.read().config.columns.iter().map(|c| c.class.clone()).collect()
    }

    /// Set every title, adjusting the column count to match first.
    pub fn set_column_titles<S: Into<String>>(
        &self,
        titles: impl IntoIterator<Item = S>,
    ) -> Result<(), GridError> {
        let titles: Vec<String> = titles.into_iter().map(Into::into).collect();
        self.set_num_columns(titles.len())?;
        for (col, title) in titles.into_iter().enumerate() {
            self.set_column_title(col, title)?;
        }
        Ok(())
    }

    /// Set every width, adjusting the column count to match first.
    pub fn set_column_widths(&self, widths: &[u32]) -> Result<(), GridError> {
        self.set_num_columns(widths.len())?;
        for (col, width) in widths.iter().enumerate() {
            self.set_column_width(col, *width)?;
        }
        Ok(())
    }

    /// Set every class, adjusting the column count to match first.
    pub fn set_column_classes<S: Into<String>>(
        &self,
        classes: impl IntoIterator<Item = S>,
    ) -> Result<(), GridError> {
        let classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        self.set_num_columns(classes.len())?;
        for (col, class) in classes.into_iter().enumerate() {
            self.set_column_class(col, class)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Appearance
    // -------------------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.read().config.width
    }

    pub fn set_width(&self, width: u32) -> Result<(), GridError> {
        check_size("width", width)?;
        let mut inner = self.write();
        inner.backend.set_width(width)?;
        inner.config.width = width;
        Ok(())
    }

    pub fn height(&self) -> u32 {
        self.read().config.height
    }

    pub fn set_height(&self, height: u32) -> Result<(), GridError> {
        check_size("height", height)?;
        let mut inner = self.write();
        let headers = inner.config.col_headers_visible;
        inner.backend.set_height(height, headers)?;
        inner.config.height = height;
        Ok(())
    }

    pub fn col_headers_visible(&self) -> bool {
        self.read().config.col_headers_visible
    }

    pub fn set_col_headers_visible(&self, visible: bool) -> Result<(), GridError> {
        let mut inner = self.write();
        let height = inner.config.height;
        inner.backend.set_headers_visible(visible, height)?;
        inner.config.col_headers_visible = visible;
        Ok(())
    }

    pub fn tab_index(&self) -> i32 {
        self.read().config.tab_index
    }

    /// Set the tab index. A disabled grid carries no tabindex until it is
    /// enabled again.
    pub fn set_tab_index(&self, tab_index: i32) -> Result<(), GridError> {
        let mut inner = self.write();
        if inner.config.enabled {
            inner.backend.set_tab_index(tab_index)?;
        }
        inner.config.tab_index = tab_index;
        Ok(())
    }

    pub fn enabled(&self) -> bool {
        self.read().config.enabled
    }

    /// Enable or disable the grid. Disabled grids ignore pointer and key
    /// input and drop their drag affordances.
    pub fn set_enabled(&self, enabled: bool) -> Result<(), GridError> {
        let mut inner = self.write();
        if inner.config.enabled == enabled {
            return Ok(());
        }
        inner.config.enabled = enabled;
        if inner.config.enable_drag_drop {
            inner.set_drag_affordances(enabled)?;
        }
        let tab_index = inner.config.tab_index;
        inner.backend.set_enabled(enabled, tab_index)
    }

    pub fn enable_drag_drop(&self) -> bool {
        self.read().config.enable_drag_drop
    }

    /// Allow or forbid drag-reordering of the selected row.
    pub fn set_enable_drag_drop(&self, enabled: bool) -> Result<(), GridError> {
        let mut inner = self.write();
        if inner.config.enable_drag_drop == enabled {
            return Ok(());
        }
        inner.config.enable_drag_drop = enabled;
        if inner.config.enabled {
            inner.set_drag_affordances(enabled)?;
        }
        Ok(())
    }
}

impl GridInner {
    fn set_drag_affordances(&mut self, on: bool) -> Result<(), GridError> {
        if self.rebuilding {
            return Ok(());
        }
        if let Some(selected) = self.config.selected_row_index {
            self.backend.set_row_draggable(selected, on)?;
        }
        if !on {
            self.end_drag()?;
        }
        self.backend.set_drop_targets(on)
    }
}
