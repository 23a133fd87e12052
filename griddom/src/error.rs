//! Document error types

/// Errors raised by structural lookups in a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// No element carries the requested id.
    #[error("element '{0}' not found")]
    NotFound(String),

    /// The subtree does not have the expected shape.
    #[error("unexpected structure: {0}")]
    Structure(String),
}
