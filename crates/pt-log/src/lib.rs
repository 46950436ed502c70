//! pt-log: per-variable sample history on a shared time axis.

pub mod export;
pub mod log;

pub use export::{HistoryExport, HistorySample};
pub use log::TimeSeriesLog;

pub type LogResult<T> = Result<T, LogError>;

#[derive(thiserror::Error, Debug)]
pub enum LogError {
    #[error("Variable was never bound: {path}")]
    UnknownVariable { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
