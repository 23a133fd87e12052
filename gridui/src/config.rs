//! Grid configuration types.

use crate::error::GridError;

/// Width of the border drawn around the grid, in pixels.
pub const BORDER_SIZE: u32 = 1;

/// Default overall width and height of a new grid.
pub const DEFAULT_SIZE: u32 = 300;

/// Width given to columns created by growing the column count.
pub const DEFAULT_COLUMN_WIDTH: u32 = 100;

/// Smallest width or height a grid can be resized to.
pub const MIN_SIZE: u32 = 10;

/// Largest width or height a grid can be resized to.
pub const MAX_SIZE: u32 = 1000;

/// Column configuration.
///
/// Row cells reference columns by position, so the column list can only be
/// resized while the grid holds no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header text. Empty titles render a blank placeholder.
    pub title: String,
    /// Width of the column's cells in pixels.
    pub width: u32,
    /// CSS class applied to every header and body cell of the column.
    pub class: String,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: DEFAULT_COLUMN_WIDTH,
            class: String::new(),
        }
    }
}

impl Column {
    /// Create a column with a title and pixel width.
    pub fn new(title: impl Into<String>, width: u32) -> Self {
        Self {
            title: title.into(),
            width,
            class: String::new(),
        }
    }

    /// Set the column's CSS class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }
}

/// Complete configuration of a grid, excluding its rows.
///
/// This is what travels from server-side rendering to client-side
/// rehydration. Row contents are not part of it: they are already present as
/// rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Columns in display order.
    pub columns: Vec<Column>,
    /// Overall width in pixels, border included.
    pub width: u32,
    /// Overall height in pixels, border included.
    pub height: u32,
    /// Tab index of the root element while enabled.
    pub tab_index: i32,
    /// Number of rows present in the rendered markup.
    pub num_rows: usize,
    /// Whether the grid reacts to input.
    pub enabled: bool,
    /// Whether the header block is shown.
    pub col_headers_visible: bool,
    /// Whether the selected row can be dragged to reorder it.
    pub enable_drag_drop: bool,
    /// Selected row, if any.
    pub selected_row_index: Option<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            tab_index: 0,
            num_rows: 0,
            enabled: true,
            col_headers_visible: true,
            enable_drag_drop: false,
            selected_row_index: None,
        }
    }
}

impl GridConfig {
    /// Create a config with default settings and no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Replace all columns.
    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Set the overall size in pixels.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the tab index.
    pub fn tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = tab_index;
        self
    }

    /// Set whether the grid is enabled.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set whether column headers are shown.
    pub fn headers_visible(mut self, visible: bool) -> Self {
        self.col_headers_visible = visible;
        self
    }

    /// Enable drag-reordering of the selected row.
    pub fn drag_drop(mut self, enabled: bool) -> Self {
        self.enable_drag_drop = enabled;
        self
    }

    /// Check the invariants a grid relies on.
    pub fn validate(&self) -> Result<(), GridError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.width) {
            return Err(GridError::configuration(format!(
                "width {} outside {MIN_SIZE}..={MAX_SIZE}",
                self.width
            )));
        }
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.height) {
            return Err(GridError::configuration(format!(
                "height {} outside {MIN_SIZE}..={MAX_SIZE}",
                self.height
            )));
        }
        if let Some(index) = self.selected_row_index {
            GridError::check_index(index, self.num_rows)?;
        }
        Ok(())
    }
}

/// Resize a column list, filling new slots with default columns.
pub(crate) fn resize_columns(columns: &mut Vec<Column>, count: usize) {
    columns.resize_with(count, Column::default);
}
