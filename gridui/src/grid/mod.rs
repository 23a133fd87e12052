//! The grid control.
//!
//! A [`Grid`] is one state machine with two backends. On the server it is
//! headless: rows live in a [`RowStore`] and [`Grid::render`] emits markup
//! with the configuration embedded as a snapshot. In the client the same
//! type is rebuilt from that markup with [`Grid::hydrate`] and from then on
//! patches the document incrementally on every mutation.
//!
//! Rows are addressed by position only. Any index held across an insert,
//! delete or drag-reorder is invalid afterwards and must be re-resolved.
//!
//! # Example
//!
//! ```ignore
//! let grid = Grid::from_config(GridConfig::new().column(Column::new("Name", 120)))?;
//! grid.set_id("people")?;
//! grid.add_item(["Ada"], None)?;
//! let html = grid.render()?;
//!
//! let doc = Document::parse(&html).into_shared();
//! let client = Grid::hydrate(doc, "people")?;
//! client.on_selection_changed(|_, e| println!("selected {:?}", e.index));
//! ```

mod backend;
mod columns;
mod drag;
mod input;
mod live;
mod rows;
mod selection;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use griddom::SharedDocument;
use log::debug;

pub use backend::{GridBackend, HeadlessBackend, Hit, RenderStats, Wiring};
pub use drag::{DropTarget, resolve_drop};
pub use live::LiveBackend;

use crate::config::{Column, GridConfig};
use crate::error::GridError;
use crate::events::{
    CellClickedEvent, DragDropCompletedEvent, DragDropCompletingEvent, GridHandlers, HandlerList,
    KeyPressEvent, SelectionChangedEvent, SelectionChangingEvent,
};
use crate::position::{Position, read_position};
use crate::registry::{ControlRegistry, ControlType};
use crate::render::{DIV_CLASS, render_full};
use crate::row_store::RowStore;
use crate::snapshot::{CONFIG_ATTR, SnapshotCodec};

/// Name the grid registers under with a [`ControlRegistry`].
pub const GRID_TYPE_NAME: &str = "Grid";

inventory::submit! {
    ControlType::new(GRID_TYPE_NAME, DIV_CLASS)
}

#[derive(Debug)]
pub(crate) struct GridInner {
    pub id: String,
    /// Everything but the row count, which is derived.
    pub config: GridConfig,
    pub position: Position,
    /// Row texts and payloads. Written in both modes.
    pub store: RowStore,
    pub backend: Box<dyn GridBackend>,
    /// Inside a begin_rebuild/end_rebuild batch.
    pub rebuilding: bool,
    /// A drag started on the selected row and has not been released.
    pub dragging: bool,
}

impl GridInner {
    fn new(id: String, config: GridConfig, position: Position) -> Self {
        Self {
            id,
            config,
            position,
            store: RowStore::new(),
            backend: Box::new(HeadlessBackend),
            rebuilding: false,
            dragging: false,
        }
    }

    /// Number of rows currently visible, or buffered while rebuilding.
    pub fn row_count(&self) -> usize {
        if self.rebuilding {
            return self.store.len();
        }
        self.backend.row_count().unwrap_or_else(|| self.store.len())
    }

    /// Whether the selected row can be dragged right now.
    pub fn drag_active(&self) -> bool {
        self.config.enable_drag_drop && self.config.enabled
    }

    pub fn wiring(&self) -> Wiring {
        Wiring {
            drop_targets: self.drag_active(),
            selected: self.config.selected_row_index,
        }
    }

    pub fn widths(&self) -> Vec<u32> {
        self.config.columns.iter().map(|c| c.width).collect()
    }

    pub fn snapshot(&self) -> GridConfig {
        GridConfig {
            num_rows: self.store.len(),
            ..self.config.clone()
        }
    }
}

/// A tabular control with single selection and drag reordering.
///
/// Cloning a `Grid` yields another handle to the same control.
#[derive(Debug, Clone)]
pub struct Grid {
    inner: Arc<RwLock<GridInner>>,
    handlers: Arc<RwLock<GridHandlers>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create a headless grid with default settings and no columns.
    pub fn new() -> Self {
        Self::from_parts(String::new(), GridConfig::default(), Position::default())
    }

    /// Create a headless grid and register its control type with the host.
    pub fn with_registry(registry: &dyn ControlRegistry) -> Self {
        registry.register_type(GRID_TYPE_NAME);
        Self::new()
    }

    /// Create a headless grid from a configuration. The row count is reset
    /// to zero, so the configuration must not select a row.
    pub fn from_config(mut config: GridConfig) -> Result<Self, GridError> {
        config.num_rows = 0;
        config.validate()?;
        Ok(Self::from_parts(String::new(), config, Position::default()))
    }

    fn from_parts(id: String, config: GridConfig, position: Position) -> Self {
        Self {
            inner: Arc::new(RwLock::new(GridInner::new(id, config, position))),
            handlers: Arc::new(RwLock::new(GridHandlers::default())),
        }
    }

    /// Rebuild a grid from server-rendered markup.
    ///
    /// Reads the snapshot embedded in element `id`, recovers the rendered
    /// rows and binds to the subtree.
    pub fn hydrate(doc: SharedDocument, id: &str) -> Result<Self, GridError> {
        let (config, position) = {
            let guard = doc.read().unwrap_or_else(PoisonError::into_inner);
            let root = guard.try_get(id)?;
            if root.bound {
                return Err(GridError::DoubleAttach(format!(
                    "element '{id}' is already bound to a grid"
                )));
            }
            let json = root.get_attr(CONFIG_ATTR).ok_or_else(|| {
                GridError::decode(format!("element '{id}' carries no {CONFIG_ATTR} attribute"))
            })?;
            (SnapshotCodec::from_json(json)?, read_position(root))
        };

        let grid = Self::from_parts(id.to_string(), config.clone(), position);
        grid.attach_with(doc, &config)?;
        Ok(grid)
    }

    /// Bind this grid to its rendered markup in `doc`.
    ///
    /// The document must contain the output of [`render`](Self::render) for
    /// the grid's current state. Attaching is one-way; a second attach fails.
    pub fn attach(&self, doc: SharedDocument) -> Result<(), GridError> {
        let snapshot = self.read().snapshot();
        self.attach_with(doc, &snapshot)
    }

    fn attach_with(&self, doc: SharedDocument, snapshot: &GridConfig) -> Result<(), GridError> {
        let mut inner = self.write();
        if inner.backend.is_live() {
            return Err(GridError::DoubleAttach(format!(
                "grid '{}' is already attached",
                inner.id
            )));
        }
        if inner.id.is_empty() {
            return Err(GridError::configuration("must set id before attach"));
        }

        let (backend, rows) = LiveBackend::attach(doc, &inner.id, snapshot, inner.wiring())?;
        inner.store = rows;
        inner.backend = Box::new(backend);
        debug!("grid '{}' is live", inner.id);
        Ok(())
    }

    /// Render the complete markup of the grid, snapshot included.
    pub fn render(&self) -> Result<String, GridError> {
        let inner = self.read();
        render_full(&inner.id, &inner.snapshot(), inner.position, &inner.store)
    }

    /// Current configuration, row count included.
    pub fn snapshot(&self) -> GridConfig {
        self.read().snapshot()
    }

    pub fn is_attached(&self) -> bool {
        self.read().backend.is_live()
    }

    /// Document patch counters. Always zero for a headless grid.
    pub fn render_stats(&self) -> RenderStats {
        self.read().backend.stats()
    }

    pub fn id(&self) -> String {
        self.read().id.clone()
    }

    pub fn set_id(&self, id: impl Into<String>) -> Result<(), GridError> {
        let id = id.into();
        let mut inner = self.write();
        inner.backend.set_id(&id)?;
        inner.id = id;
        Ok(())
    }

    pub fn position(&self) -> Position {
        self.read().position
    }

    pub fn set_position(&self, position: Position) -> Result<(), GridError> {
        let mut inner = self.write();
        inner.backend.set_position(position)?;
        inner.position = position;
        Ok(())
    }

    pub fn columns(&self) -> Vec<Column> {
        self.read().config.columns.clone()
    }

    /// Move keyboard focus to the grid. Does nothing while headless.
    pub fn focus(&self) -> Result<(), GridError> {
        self.write().backend.focus()
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    pub fn on_selection_changing(
        &self,
        handler: impl Fn(&Grid, &mut SelectionChangingEvent) + Send + Sync + 'static,
    ) {
        self.handlers_mut().selection_changing.push(Arc::new(handler));
    }

    pub fn on_selection_changed(
        &self,
        handler: impl Fn(&Grid, &mut SelectionChangedEvent) + Send + Sync + 'static,
    ) {
        self.handlers_mut().selection_changed.push(Arc::new(handler));
    }

    pub fn on_cell_clicked(
        &self,
        handler: impl Fn(&Grid, &mut CellClickedEvent) + Send + Sync + 'static,
    ) {
        self.handlers_mut().cell_clicked.push(Arc::new(handler));
    }

    pub fn on_key_press(&self, handler: impl Fn(&Grid, &mut KeyPressEvent) + Send + Sync + 'static) {
        self.handlers_mut().key_press.push(Arc::new(handler));
    }

    pub fn on_drag_drop_completing(
        &self,
        handler: impl Fn(&Grid, &mut DragDropCompletingEvent) + Send + Sync + 'static,
    ) {
        self.handlers_mut().drag_drop_completing.push(Arc::new(handler));
    }

    pub fn on_drag_drop_completed(
        &self,
        handler: impl Fn(&Grid, &mut DragDropCompletedEvent) + Send + Sync + 'static,
    ) {
        self.handlers_mut().drag_drop_completed.push(Arc::new(handler));
    }

    /// Run the observers selected by `list`. No lock is held while they run,
    /// so observers may call back into the grid.
    fn fire<E>(&self, list: impl FnOnce(&GridHandlers) -> HandlerList<E>, event: &mut E) {
        let handlers = list(&self.handlers.read().unwrap_or_else(PoisonError::into_inner));
        handlers.fire(self, event);
    }

    // -------------------------------------------------------------------------
    // Locking
    // -------------------------------------------------------------------------

    fn read(&self) -> RwLockReadGuard<'_, GridInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, GridInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn handlers_mut(&self) -> RwLockWriteGuard<'_, GridHandlers> {
        self.handlers.write().unwrap_or_else(PoisonError::into_inner)
    }
}
