//! Snapshot store boundary for the Genepool population browser.
//!
//! A snapshot is a durable, point-in-time record of a population written by
//! an evolution run. This crate resolves snapshot handles to validated
//! [`Population`](genepool_types::Population) values and never writes to the
//! underlying resource.
//!
//! # Modules
//!
//! - [`handle`] -- Non-empty snapshot handles
//! - [`store`] -- The [`SnapshotStore`] trait
//! - [`file`] -- JSON documents in a directory on disk
//! - [`memory`] -- JSON documents held in memory
//! - [`document`] -- Document shape, decoding, and encoding
//! - [`error`] -- Not-found vs. decode failures

pub mod document;
pub mod error;
pub mod file;
pub mod handle;
pub mod memory;
pub mod store;

// Re-export primary types for convenience.
pub use document::{GenomeDocument, SnapshotDocument, decode_population, encode_population};
pub use error::{DecodeError, HandleError, StoreError};
pub use file::FileSnapshotStore;
pub use handle::SnapshotHandle;
pub use memory::MemorySnapshotStore;
pub use store::SnapshotStore;
