use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid variable path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },
}
