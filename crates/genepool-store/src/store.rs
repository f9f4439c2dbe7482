//! The snapshot store trait.
//!
//! A [`SnapshotStore`] resolves a [`SnapshotHandle`] to a freshly decoded
//! [`Population`]. It is the only I/O boundary of the browser core and must
//! never mutate the underlying resource.

use std::future::Future;

use genepool_types::Population;

use crate::error::StoreError;
use crate::handle::SnapshotHandle;

/// A source of population snapshots.
///
/// On success the returned population satisfies every population
/// invariant. Implementations return [`StoreError::NotFound`] when the
/// resource is absent or unreadable and [`StoreError::Decode`] when it
/// exists but cannot be parsed.
pub trait SnapshotStore: Send + Sync {
    /// Load and decode the snapshot named by `handle`.
    fn load(
        &self,
        handle: &SnapshotHandle,
    ) -> impl Future<Output = Result<Population, StoreError>> + Send;
}
