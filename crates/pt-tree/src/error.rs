//! Tree-specific error types.

use pt_core::CoreError;

pub type TreeResult<T> = Result<T, TreeError>;

/// Tree construction errors.
///
/// Lookups return `Option`; only malformed input paths are errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    /// The inserted path is not a valid slash-separated path.
    InvalidPath { path: String, reason: &'static str },
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::InvalidPath { path, reason } => {
                write!(f, "Cannot insert '{}': {}", path, reason)
            }
        }
    }
}

impl std::error::Error for TreeError {}

impl From<CoreError> for TreeError {
    fn from(err: CoreError) -> Self {
        let CoreError::InvalidPath { path, reason } = err;
        TreeError::InvalidPath { path, reason }
    }
}

#[cfg(test)]
mod tests {
    use crate::PathTrie;

    use super::*;

    #[test]
    fn malformed_paths_surface_as_invalid_path() {
        let Err(err) = PathTrie::from_leaves(["a//b"]) else {
            panic!("malformed path accepted");
        };
        match &err {
            TreeError::InvalidPath { path, .. } => assert_eq!(path, "a//b"),
        }
        assert!(err.to_string().starts_with("Cannot insert 'a//b'"));
    }
}
