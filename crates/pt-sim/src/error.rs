//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while integrating a model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<SimError> for pt_engine::EngineError {
    fn from(e: SimError) -> Self {
        pt_engine::EngineError::Backend {
            message: e.to_string(),
        }
    }
}
