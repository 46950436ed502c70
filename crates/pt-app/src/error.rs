//! Error types for the pt-app layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for both CLI and GUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not a number: {input:?}")]
    InvalidNumber { input: String },

    #[error("Expected path=value, got {input:?}")]
    InvalidAssignment { input: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Engine(#[from] pt_engine::EngineError),

    #[error(transparent)]
    Log(#[from] pt_log::LogError),

    #[error(transparent)]
    Plot(#[from] pt_plot::PlotError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pt-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<pt_sim::SimError> for AppError {
    fn from(err: pt_sim::SimError) -> Self {
        AppError::Engine(err.into())
    }
}
