//! Grid notification types and observer lists.
//!
//! Every notification is an explicit list of observers invoked in
//! registration order. Cancellable notifications carry a mutable flag on the
//! event payload which is read only after every observer has run.

use std::fmt;
use std::sync::Arc;

use crate::grid::Grid;

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
    /// Event started a drag operation on this grid.
    StartDrag,
}

impl EventResult {
    /// Check if the event was handled (consumed or started drag).
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// Raised before the selection changes. Set `cancel` to veto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChangingEvent {
    pub old_index: Option<usize>,
    pub new_index: Option<usize>,
    pub cancel: bool,
}

/// Raised after every selection attempt that got past the changing phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChangedEvent {
    /// Selection at the time the notification fires.
    pub index: Option<usize>,
}

/// Raised when a cell is clicked, before the row is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellClickedEvent {
    pub row: usize,
    pub col: usize,
    /// Set to keep the clicked row from being selected.
    pub prevent_row_select: bool,
}

/// Raised for every key pressed while the grid has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPressEvent {
    pub key_code: u32,
    /// Set to suppress keyboard navigation.
    pub prevent_default: bool,
}

/// Raised before a dragged row is moved. Set `cancel` to abandon the drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragDropCompletingEvent {
    pub item_index: usize,
    pub drop_index: usize,
    pub cancel: bool,
}

/// Raised after a dragged row has been moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragDropCompletedEvent {
    /// Position the row was dragged from.
    pub item_index: usize,
    /// Position the row now occupies.
    pub drop_index: usize,
}

/// A registered observer.
pub type Handler<E> = Arc<dyn Fn(&Grid, &mut E) + Send + Sync>;

/// Ordered observers for one notification.
pub struct HandlerList<E> {
    handlers: Vec<Handler<E>>,
}

impl<E> Default for HandlerList<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<E> Clone for HandlerList<E> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<E> fmt::Debug for HandlerList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerList")
            .field("len", &self.handlers.len())
            .finish()
    }
}

impl<E> HandlerList<E> {
    pub fn push(&mut self, handler: Handler<E>) {
        self.handlers.push(handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke every observer in registration order.
    pub fn fire(&self, grid: &Grid, event: &mut E) {
        for handler in &self.handlers {
            handler(grid, event);
        }
    }
}

/// All notification lists of a grid.
#[derive(Debug, Clone, Default)]
pub struct GridHandlers {
    pub selection_changing: HandlerList<SelectionChangingEvent>,
    pub selection_changed: HandlerList<SelectionChangedEvent>,
    pub cell_clicked: HandlerList<CellClickedEvent>,
    pub key_press: HandlerList<KeyPressEvent>,
    pub drag_drop_completing: HandlerList<DragDropCompletingEvent>,
    pub drag_drop_completed: HandlerList<DragDropCompletedEvent>,
}
