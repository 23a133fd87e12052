pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod hit;
pub mod layout;
pub mod parse;
pub mod scroll;
pub mod serialize;

pub use document::{Document, SharedDocument};
pub use element::{Content, Element};
pub use error::DomError;
pub use event::{Event, Key, MouseButton};
pub use hit::{child_at_y, span_at_x};
pub use layout::Metrics;
pub use scroll::reveal_offset;
pub use serialize::{inner_html, outer_html};
