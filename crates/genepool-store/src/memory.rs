//! In-memory snapshot store.
//!
//! Holds raw snapshot documents keyed by handle. Documents are decoded on
//! every load exactly like the file store, so a host that already has the
//! bytes gets the same validation.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use genepool_types::Population;

use crate::document::{decode_population, encode_population};
use crate::error::StoreError;
use crate::handle::SnapshotHandle;
use crate::store::SnapshotStore;

/// Snapshot documents held in memory.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    documents: RwLock<BTreeMap<SnapshotHandle, Vec<u8>>>,
}

impl MemorySnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw document bytes under `handle`, replacing any earlier ones.
    pub fn insert_document(&self, handle: SnapshotHandle, bytes: Vec<u8>) {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle, bytes);
    }

    /// Encode `population` and store it under `handle`.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if encoding fails.
    pub fn insert_population(
        &self,
        handle: SnapshotHandle,
        population: &Population,
    ) -> Result<(), serde_json::Error> {
        let bytes = encode_population(population)?;
        self.insert_document(handle, bytes);
        Ok(())
    }

    /// Remove the document under `handle`. Returns whether one was present.
    pub fn remove(&self, handle: &SnapshotHandle) -> bool {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(handle)
            .is_some()
    }

    /// All stored handles in sorted order.
    pub fn handles(&self) -> Vec<SnapshotHandle> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self, handle: &SnapshotHandle) -> Result<Population, StoreError> {
        let bytes = self
            .documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(handle)
            .cloned();
        let Some(bytes) = bytes else {
            return Err(StoreError::NotFound {
                handle: handle.clone(),
                source: None,
            });
        };
        decode_population(&bytes).map_err(|source| StoreError::Decode {
            handle: handle.clone(),
            source,
        })
    }
}
