//! Grid error types.
//!
//! Every variant is a contract violation surfaced to the caller; there are
//! no transient failures and nothing is retried.

use griddom::DomError;

/// Errors raised by grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Invalid configuration, e.g. rendering without an id or changing the
    /// column count while rows exist.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The embedded snapshot or the markup it describes is malformed.
    #[error("snapshot decode error: {0}")]
    Decode(String),

    /// A row, column or selection index is out of range.
    #[error("index {index} out of range (len {len})")]
    Index {
        /// The offending index.
        index: usize,
        /// The length the index was checked against.
        len: usize,
    },

    /// The grid is already attached, or the element is bound to another grid.
    #[error("double attach: {0}")]
    DoubleAttach(String),

    /// The attach target does not exist in the document.
    #[error("element '{0}' not found")]
    ElementNotFound(String),
}

impl GridError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Creates an index error.
    pub fn index(index: usize, len: usize) -> Self {
        Self::Index { index, len }
    }

    /// Checks `index < len`.
    pub fn check_index(index: usize, len: usize) -> Result<(), Self> {
        if index < len {
            Ok(())
        } else {
            Err(Self::index(index, len))
        }
    }
}

impl From<DomError> for GridError {
    fn from(err: DomError) -> Self {
        match err {
            DomError::NotFound(id) => Self::ElementNotFound(id),
            DomError::Structure(message) => Self::Decode(message),
        }
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
