//! The seam between the grid state machine and its environment.
//!
//! A grid is either headless (no document: rows live in the [`RowStore`]
//! only) or live (bound to a document subtree it keeps in sync). The backend
//! is chosen when the grid is constructed or attached and never mixed.
//!
//! [`RowStore`]: crate::row_store::RowStore

use std::fmt;

use crate::error::GridError;
use crate::position::Position;

/// Counters describing how a live grid touched its document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Bulk replacements of the whole row body or inner skeleton.
    pub full_renders: usize,
    /// Incremental single-row patches: insert, update, remove, move.
    pub row_patches: usize,
    /// Passes wiring interaction flags onto rows and headers.
    pub rewires: usize,
}

/// Interaction state applied to rows when wiring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wiring {
    /// Rows and the values block accept drops.
    pub drop_targets: bool,
    /// Currently selected row; draggable when drops are enabled.
    pub selected: Option<usize>,
}

/// What lies under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A header cell.
    Header { col: usize },
    /// A body row; `col` is None over the row but outside every cell.
    Row { row: usize, col: Option<usize> },
    /// The scrollable values block, below the last row.
    ValuesArea,
    /// Outside the grid.
    Outside,
}

/// Environment-specific half of a grid.
///
/// Every method defaults to doing nothing, which is exactly the headless
/// behavior. Read methods return None when the backend holds no rows of its
/// own and the caller must fall back to the row store.
pub trait GridBackend: fmt::Debug + Send + Sync {
    fn is_live(&self) -> bool {
        false
    }

    fn stats(&self) -> RenderStats {
        RenderStats::default()
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    fn row_count(&self) -> Option<usize> {
        None
    }

    fn row_texts(&self, _index: usize) -> Option<Vec<String>> {
        None
    }

    fn hit(&self, _x: i32, _y: i32, _widths: &[u32]) -> Hit {
        Hit::Outside
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    fn insert_row(&mut self, _index: usize, _markup: &str, _wiring: Wiring) -> Result<(), GridError> {
        Ok(())
    }

    fn update_row(&mut self, _index: usize, _cells: &[String]) -> Result<(), GridError> {
        Ok(())
    }

    fn remove_row(&mut self, _index: usize) -> Result<(), GridError> {
        Ok(())
    }

    fn clear_rows(&mut self) -> Result<(), GridError> {
        Ok(())
    }

    /// Replace the whole row body and wire it.
    fn replace_rows(&mut self, _markup: &str, _wiring: Wiring) -> Result<(), GridError> {
        Ok(())
    }

    fn move_row(&mut self, _from: usize, _to: usize) -> Result<(), GridError> {
        Ok(())
    }

    /// Flip the striping class of every row from `start` to the end.
    fn toggle_parity_from(&mut self, _start: usize) -> Result<(), GridError> {
        Ok(())
    }

    /// Set striping from position for rows `first..=last`.
    fn set_parity_range(&mut self, _first: usize, _last: usize) -> Result<(), GridError> {
        Ok(())
    }

    fn set_row_class(&mut self, _index: usize, _class: &str, _enabled: bool) -> Result<(), GridError> {
        Ok(())
    }

    /// Remove `class` from every row.
    fn clear_row_class(&mut self, _class: &str) -> Result<(), GridError> {
        Ok(())
    }

    fn set_row_draggable(&mut self, _index: usize, _draggable: bool) -> Result<(), GridError> {
        Ok(())
    }

    fn set_drop_targets(&mut self, _enabled: bool) -> Result<(), GridError> {
        Ok(())
    }

    fn ensure_visible(&mut self, _index: usize) -> Result<(), GridError> {
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    fn set_column_width(&mut self, _col: usize, _width: u32) -> Result<(), GridError> {
        Ok(())
    }

    fn set_column_title(&mut self, _col: usize, _title: &str) -> Result<(), GridError> {
        Ok(())
    }

    fn set_column_class(&mut self, _col: usize, _old: &str, _new: &str) -> Result<(), GridError> {
        Ok(())
    }

    /// Replace the header and values blocks and wire them.
    fn replace_inner(&mut self, _markup: &str, _wiring: Wiring) -> Result<(), GridError> {
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Appearance
    // -------------------------------------------------------------------------

    fn set_width(&mut self, _width: u32) -> Result<(), GridError> {
        Ok(())
    }

    fn set_height(&mut self, _height: u32, _headers_visible: bool) -> Result<(), GridError> {
        Ok(())
    }

    fn set_headers_visible(&mut self, _visible: bool, _height: u32) -> Result<(), GridError> {
        Ok(())
    }

    fn set_enabled(&mut self, _enabled: bool, _tab_index: i32) -> Result<(), GridError> {
        Ok(())
    }

    fn set_tab_index(&mut self, _tab_index: i32) -> Result<(), GridError> {
        Ok(())
    }

    fn set_id(&mut self, _id: &str) -> Result<(), GridError> {
        Ok(())
    }

    fn set_position(&mut self, _position: Position) -> Result<(), GridError> {
        Ok(())
    }

    fn focus(&mut self) -> Result<(), GridError> {
        Ok(())
    }

    /// Apply a scroll offset to the values block and mirror its horizontal
    /// part onto the header block.
    fn scroll_values(&mut self, _x: u32, _y: u32) -> Result<(), GridError> {
        Ok(())
    }
}

/// Backend of a grid that has no document.
#[derive(Debug, Default)]
pub struct HeadlessBackend;

impl GridBackend for HeadlessBackend {}
