//! Error types for the browser core.
//!
//! [`LoadError`] is what a failed `select` reports to its caller. A missing
//! snapshot is not an error at this level; it is the silent
//! [`SelectOutcome::Unavailable`](crate::loader::SelectOutcome::Unavailable).

use genepool_store::{DecodeError, SnapshotHandle, StoreError};
use genepool_types::PopulationError;

/// A snapshot could not be loaded and published.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The snapshot exists but could not be decoded into a valid population.
    #[error("snapshot {handle} could not be decoded: {source}")]
    Decode {
        /// The selected snapshot.
        handle: SnapshotHandle,
        /// The decode failure.
        #[source]
        source: DecodeError,
    },

    /// Statistics could not be installed on the loaded population.
    #[error("stats refresh failed for snapshot {handle}: {source}")]
    Stats {
        /// The selected snapshot.
        handle: SnapshotHandle,
        /// The underlying population error.
        #[source]
        source: PopulationError,
    },

    /// Any other store failure.
    #[error("snapshot store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },
}
