//! Canonical variable identity.
//!
//! A variable is identified by its slash-separated path for the whole
//! session. Two variables are the same iff their paths are equal, so the
//! path is shared (`Arc<str>`) rather than copied wherever it is referenced.

use core::fmt;
use std::borrow::Borrow;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};

/// Path separator between hierarchy levels.
pub const SEPARATOR: char = '/';

/// Immutable, cheaply clonable variable path such as `aero/coefficient/CLalpha`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarPath(Arc<str>);

impl VarPath {
    /// Parse and validate a path: non-empty segments, no leading or trailing separator.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        if raw.is_empty() {
            return Err(CoreError::InvalidPath {
                path: raw.to_string(),
                reason: "path is empty",
            });
        }
        if raw.split(SEPARATOR).any(str::is_empty) {
            return Err(CoreError::InvalidPath {
                path: raw.to_string(),
                reason: "path has an empty segment",
            });
        }
        Ok(Self(Arc::from(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// Number of segments (display depth of the leaf is `depth() - 1`).
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Last segment, used as display name.
    pub fn name(&self) -> &str {
        self.0.rsplit(SEPARATOR).next().unwrap_or(&self.0)
    }
}

impl fmt::Debug for VarPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarPath({})", self.0)
    }
}

impl fmt::Display for VarPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VarPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets maps keyed by `VarPath` be queried with a plain `&str`.
impl Borrow<str> for VarPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for VarPath {
    type Error = CoreError;

    fn try_from(raw: &str) -> CoreResult<Self> {
        Self::parse(raw)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn joined_segments_round_trip(segs in prop::collection::vec("[a-zA-Z0-9_-]{1,8}", 1..6)) {
            let raw = segs.join("/");
            let path = VarPath::parse(&raw).unwrap();
            prop_assert_eq!(path.depth(), segs.len());
            prop_assert_eq!(path.name(), segs.last().unwrap().as_str());
            prop_assert_eq!(path.segments().collect::<Vec<_>>(), segs.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
