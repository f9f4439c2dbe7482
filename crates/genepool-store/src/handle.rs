//! Handles naming durable snapshot resources.

use core::fmt;
use std::path::{Path, PathBuf};

use crate::error::HandleError;

/// A non-empty reference to a durable snapshot (a file path).
///
/// An empty handle is a contract violation and cannot be constructed, so
/// an unset selection is expressed as `Option<SnapshotHandle>` instead.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotHandle(PathBuf);

impl SnapshotHandle {
    /// Create a handle for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HandleError::Empty`] if the path is empty.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, HandleError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(HandleError::Empty);
        }
        Ok(Self(path))
    }

    /// The snapshot path.
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Short display alias: the file name, or the whole path if it has none.
    pub fn alias(&self) -> String {
        self.0.file_name().map_or_else(
            || self.0.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }
}

impl fmt::Display for SnapshotHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl TryFrom<&str> for SnapshotHandle {
    type Error = HandleError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        Self::new(path)
    }
}
