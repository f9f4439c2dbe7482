//! Error types for the snapshot store boundary.
//!
//! [`StoreError`] separates the two outcomes callers treat differently:
//! [`StoreError::NotFound`] is expected and silent, [`StoreError::Decode`]
//! is surfaced for display. Invariant violations of a decoded population
//! are a [`DecodeError`] and are never accepted.

use std::path::PathBuf;

use genepool_types::{AttributeId, AttributeKind, GenomeId, PopulationError};

use crate::handle::SnapshotHandle;

/// A snapshot handle could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleError {
    /// The handle path is empty.
    #[error("snapshot handle must not be empty")]
    Empty,
}

/// Why a snapshot document could not become a population.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The document is not valid JSON or does not match the document shape.
    #[error("malformed snapshot document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// An attribute value does not fit the attribute's declared kind.
    #[error("genome {genome} attribute {attribute}: expected {expected} value, found {found}")]
    Schema {
        /// The offending genome.
        genome: GenomeId,
        /// The attribute whose value is mistyped.
        attribute: AttributeId,
        /// Kind declared in the document's attribute list.
        expected: AttributeKind,
        /// The JSON value that was found.
        found: String,
    },

    /// The decoded population violates its invariants.
    #[error("snapshot violates population invariants: {0}")]
    Invariant(#[from] PopulationError),

    /// The document exceeds the configured size limit.
    #[error("snapshot document is {size} bytes, limit is {limit}")]
    TooLarge {
        /// Document size in bytes, or the bytes read if the file grew.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },
}

/// Errors returned by a [`SnapshotStore`](crate::SnapshotStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The snapshot does not exist or is unreadable at the transport layer.
    #[error("snapshot not found: {handle}")]
    NotFound {
        /// The requested snapshot.
        handle: SnapshotHandle,
        /// The underlying I/O error, if any.
        #[source]
        source: Option<std::io::Error>,
    },

    /// The snapshot exists but could not be decoded into a population.
    #[error("failed to decode snapshot {handle}: {source}")]
    Decode {
        /// The requested snapshot.
        handle: SnapshotHandle,
        /// What went wrong.
        #[source]
        source: DecodeError,
    },

    /// The snapshot directory could not be listed.
    #[error("failed to list snapshot directory {}: {source}", .directory.display())]
    Discovery {
        /// The directory being listed.
        directory: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Whether this is the silent "not found" outcome.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
