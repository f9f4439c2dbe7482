//! Guarded population loading for the Genepool snapshot browser.
//!
//! An evolution run writes many population snapshots, possibly while they
//! are being browsed. This crate loads one selected snapshot at a time,
//! recomputes its statistics, and publishes the population/statistics pair
//! atomically for any number of readers.
//!
//! # Architecture
//!
//! ```text
//! UI events (add / select / clear)
//!     |
//!     +-- PopulationBrowser
//!         |-- SnapshotCatalog   (navigable handles, title)
//!         +-- GuardedLoader     (exclusive section)
//!             |-- SnapshotStore::load
//!             |-- StatsEngine::refresh_stats
//!             +-- publish Arc<Selection> --> current() / report()
//! ```
//!
//! # Modules
//!
//! - [`loader`] -- The guarded load-and-publish state machine
//! - [`catalog`] -- Navigable snapshot handles
//! - [`browser`] -- Inbound panel events
//! - [`report`] -- Outbound display projection
//! - [`config`] -- YAML configuration
//! - [`error`] -- Load errors

pub mod browser;
pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;

// Re-export primary types for convenience.
pub use browser::PopulationBrowser;
pub use catalog::SnapshotCatalog;
pub use config::{BrowserConfig, ConfigError, SnapshotConfig};
pub use error::LoadError;
pub use loader::{GuardedLoader, LoadFailure, LoaderState, SelectOutcome, Selection};
pub use report::{AttributeRow, PopulationReport};
