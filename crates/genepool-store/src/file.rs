//! File-backed snapshot store.
//!
//! Snapshot documents are JSON files written by an evolution run into a
//! single directory. [`FileSnapshotStore::discover`] lists them in file
//! name order; [`SnapshotStore::load`] reads and decodes one.

use std::path::{Path, PathBuf};

use genepool_types::Population;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::document::decode_population;
use crate::error::{DecodeError, StoreError};
use crate::handle::SnapshotHandle;
use crate::store::SnapshotStore;

/// Default snapshot file extension.
pub const DEFAULT_EXTENSION: &str = "json";

/// Default upper bound on a single snapshot document (64 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 64 * 1024 * 1024;

/// Reads snapshot documents from a directory on disk.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    directory: PathBuf,
    extension: String,
    max_document_bytes: u64,
}

impl FileSnapshotStore {
    /// Create a store over `directory` with default extension and limit.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            extension: DEFAULT_EXTENSION.to_owned(),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }

    /// Only files with this extension are discovered.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Documents larger than `limit` bytes are rejected without parsing.
    #[must_use]
    pub const fn with_max_document_bytes(mut self, limit: u64) -> Self {
        self.max_document_bytes = limit;
        self
    }

    /// The snapshot directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// List snapshot files in the directory, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Discovery`] if the directory cannot be read.
    pub async fn discover(&self) -> Result<Vec<SnapshotHandle>, StoreError> {
        let discovery_error = |source| StoreError::Discovery {
            directory: self.directory.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.directory)
            .await
            .map_err(discovery_error)?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(discovery_error)? {
            let path = entry.path();
            let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
            let matches = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension.as_str()));
            if is_file && matches {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        debug!(
            directory = %self.directory.display(),
            count = paths.len(),
            "Discovered snapshot files"
        );

        Ok(paths
            .into_iter()
            .filter_map(|path| SnapshotHandle::new(path).ok())
            .collect())
    }
}

impl SnapshotStore for FileSnapshotStore {
    async fn load(&self, handle: &SnapshotHandle) -> Result<Population, StoreError> {
        let path = handle.path();
        let not_found = |source| StoreError::NotFound {
            handle: handle.clone(),
            source: Some(source),
        };
        let metadata = tokio::fs::metadata(path).await.map_err(not_found)?;
        if !metadata.is_file() {
            return Err(StoreError::NotFound {
                handle: handle.clone(),
                source: None,
            });
        }
        let file = tokio::fs::File::open(path).await.map_err(not_found)?;

        // The file may still be growing, so bound the read itself.
        let mut bytes = Vec::new();
        file.take(self.max_document_bytes.saturating_add(1))
            .read_to_end(&mut bytes)
            .await
            .map_err(not_found)?;
        let read = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        if read > self.max_document_bytes {
            return Err(StoreError::Decode {
                handle: handle.clone(),
                source: DecodeError::TooLarge {
                    size: metadata.len().max(read),
                    limit: self.max_document_bytes,
                },
            });
        }
        debug!(path = %path.display(), bytes = bytes.len(), "Read snapshot document");

        decode_population(&bytes).map_err(|source| StoreError::Decode {
            handle: handle.clone(),
            source,
        })
    }
}
