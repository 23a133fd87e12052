//! A tabular control rendered on the server and rehydrated in the client.
//!
//! The same [`Grid`] type runs in both places. Headless, it keeps rows in a
//! [`RowStore`] and renders markup with its configuration embedded as a
//! snapshot. Hydrated from that markup, it keeps the document in sync with
//! every mutation through minimal patches.

pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod position;
pub mod registry;
pub mod render;
pub mod row_store;
pub mod snapshot;

pub use config::{Column, GridConfig};
pub use error::GridError;
pub use events::{
    CellClickedEvent, DragDropCompletedEvent, DragDropCompletingEvent, EventResult, KeyPressEvent,
    SelectionChangedEvent, SelectionChangingEvent,
};
pub use grid::{DropTarget, Grid, RenderStats};
pub use position::Position;
pub use registry::{ControlRegistry, ScriptManager};
pub use render::{Renderer, render_full};
pub use row_store::{RowData, RowStore};
pub use snapshot::SnapshotCodec;
