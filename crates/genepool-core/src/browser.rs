//! Inbound events of the population panel.
//!
//! [`PopulationBrowser`] pairs the navigable [`SnapshotCatalog`] with a
//! shared [`GuardedLoader`]. The catalog belongs to the caller driving the
//! panel; the loader can be shared with background refresh triggers via
//! [`PopulationBrowser::loader`].

use std::sync::Arc;

use genepool_store::{FileSnapshotStore, SnapshotHandle, SnapshotStore};
use tracing::info;

use crate::catalog::SnapshotCatalog;
use crate::config::BrowserConfig;
use crate::error::LoadError;
use crate::loader::{GuardedLoader, SelectOutcome};
use crate::report::PopulationReport;

/// Navigable snapshot list plus the guarded loader behind it.
#[derive(Debug)]
pub struct PopulationBrowser<S> {
    catalog: SnapshotCatalog,
    loader: Arc<GuardedLoader<S>>,
}

impl<S: SnapshotStore> PopulationBrowser<S> {
    /// Create a browser with an empty catalog over `store`.
    pub fn new(store: S) -> Self {
        Self::with_loader(Arc::new(GuardedLoader::new(store)))
    }

    /// Create a browser around an existing shared loader.
    pub const fn with_loader(loader: Arc<GuardedLoader<S>>) -> Self {
        Self {
            catalog: SnapshotCatalog::new(),
            loader,
        }
    }

    /// The navigable snapshots.
    pub const fn catalog(&self) -> &SnapshotCatalog {
        &self.catalog
    }

    /// The shared loader.
    pub const fn loader(&self) -> &Arc<GuardedLoader<S>> {
        &self.loader
    }

    /// Make `handles` navigable.
    pub fn add_all(&mut self, handles: impl IntoIterator<Item = SnapshotHandle>) {
        self.catalog.add_all(handles);
        info!(title = %self.catalog.title(), "Added snapshots");
    }

    /// Selection changed to the catalog entry at `index`.
    ///
    /// `None` or an index past the end is an unset selection.
    pub async fn select_index(&self, index: Option<usize>) -> Result<SelectOutcome, LoadError> {
        let handle = index.and_then(|i| self.catalog.get(i));
        self.loader.select(handle).await
    }

    /// Selection changed to `handle`.
    pub async fn select(&self, handle: &SnapshotHandle) -> Result<SelectOutcome, LoadError> {
        self.loader.select(Some(handle)).await
    }

    /// Empty the catalog and reset the current selection.
    pub async fn clear(&mut self) {
        self.catalog.clear();
        self.loader.clear().await;
        info!(title = %self.catalog.title(), "Cleared snapshots");
    }

    /// Display projection of the current selection.
    pub fn report(&self) -> Option<PopulationReport> {
        self.loader
            .current()
            .map(|selection| PopulationReport::from_selection(&selection))
    }
}

impl PopulationBrowser<FileSnapshotStore> {
    /// Create a browser over the configured snapshot directory.
    pub fn from_config(config: &BrowserConfig) -> Self {
        Self::new(config.file_store())
    }

    /// Rediscover the snapshot directory and append new snapshots.
    ///
    /// Discovery runs inside the loader's exclusive section. Returns the
    /// number of handles added.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Store`] if the directory cannot be listed.
    pub async fn refresh_from_store(&mut self) -> Result<usize, LoadError> {
        let handles = {
            let store = self.loader.lock_store().await;
            store.discover().await?
        };
        let added = self.catalog.add_missing(handles);
        info!(added, title = %self.catalog.title(), "Refreshed snapshot catalog");
        Ok(added)
    }
}
