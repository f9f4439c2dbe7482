//! Statistics over Genepool populations.
//!
//! [`StatsEngine`] scans a population once per tracked attribute and reports
//! the highest and lowest holders plus the mean. The scan is deterministic:
//!
//! - genomes are visited in population order
//! - undefined values (absent or NaN) are skipped
//! - extrema are replaced only on a strictly greater / strictly lower value,
//!   so the first genome in population order wins ties
//! - an attribute no genome defines reports
//!   [`AttributeSummary::NoData`](genepool_types::AttributeSummary::NoData)
//!
//! # Modules
//!
//! - [`engine`] -- The stats engine and its refresh operation

pub mod engine;

pub use engine::StatsEngine;
