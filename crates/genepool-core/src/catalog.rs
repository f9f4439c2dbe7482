//! The list of navigable population snapshots.

use genepool_store::SnapshotHandle;

/// Base of the catalog title.
const TITLE_BASE: &str = "Populations";

/// Ordered list of snapshot handles a user can navigate.
///
/// Only handles are kept; a population is loaded when its handle is
/// selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotCatalog {
    handles: Vec<SnapshotHandle>,
}

impl SnapshotCatalog {
    /// Create an empty catalog.
    pub const fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Append every handle, in order.
    pub fn add_all(&mut self, handles: impl IntoIterator<Item = SnapshotHandle>) {
        self.handles.extend(handles);
    }

    /// Append handles not already listed. Returns how many were added.
    pub fn add_missing(&mut self, handles: impl IntoIterator<Item = SnapshotHandle>) -> usize {
        let before = self.handles.len();
        for handle in handles {
            if !self.handles.contains(&handle) {
                self.handles.push(handle);
            }
        }
        self.handles.len().saturating_sub(before)
    }

    /// Remove every handle.
    pub fn clear(&mut self) {
        self.handles.clear();
    }

    /// The handle at `index`.
    pub fn get(&self, index: usize) -> Option<&SnapshotHandle> {
        self.handles.get(index)
    }

    /// Position of `handle` in the catalog.
    pub fn position(&self, handle: &SnapshotHandle) -> Option<usize> {
        self.handles.iter().position(|h| h == handle)
    }

    /// Handles in navigation order.
    pub fn iter(&self) -> impl Iterator<Item = &SnapshotHandle> {
        self.handles.iter()
    }

    /// Number of handles.
    pub const fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the catalog is empty.
    pub const fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Title with the handle count, e.g. `Populations (3)`.
    pub fn title(&self) -> String {
        format!("{TITLE_BASE} ({})", self.handles.len())
    }
}
