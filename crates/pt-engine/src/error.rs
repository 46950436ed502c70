//! Error types for engine access.

use thiserror::Error;

/// Errors surfaced by the engine or the catalog wrapping it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The path does not resolve to a leaf of the catalog.
    #[error("Unknown property: {path}")]
    UnknownPath { path: String },

    /// Write attempted on a variable without write access.
    #[error("Property is read-only: {path}")]
    ReadOnly { path: String },

    /// The engine advertised a path that cannot be placed in the tree.
    #[error("Invalid catalog entry: {message}")]
    InvalidCatalog { message: String },

    /// Failure inside the simulation itself.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type EngineResult<T> = Result<T, EngineError>;

impl From<pt_tree::TreeError> for EngineError {
    fn from(err: pt_tree::TreeError) -> Self {
        EngineError::InvalidCatalog {
            message: err.to_string(),
        }
    }
}
