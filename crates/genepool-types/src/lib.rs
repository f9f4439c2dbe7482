//! Shared type definitions for the Genepool population snapshot browser.
//!
//! This crate is the single source of truth for populations, genomes, and
//! their typed attributes. Display-facing types flow downstream to
//! `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for genome and population ids
//! - [`attribute`] -- Attribute ids, declared kinds, values, and the registry
//! - [`genome`] -- A single evolved candidate
//! - [`population`] -- The validated population aggregate
//! - [`stats`] -- Derived per-attribute statistics
//! - [`error`] -- Population invariant violations

pub mod attribute;
pub mod error;
pub mod genome;
pub mod ids;
pub mod population;
pub mod stats;

// Re-export all public types at crate root for convenience.
pub use attribute::{AttributeId, AttributeKind, AttributeRegistry, AttributeSpec, AttributeValue};
pub use error::PopulationError;
pub use genome::Genome;
pub use ids::{GenomeId, PopulationId};
pub use population::Population;
pub use stats::{AttributeStats, AttributeSummary, Extremum, StatsSnapshot};

#[cfg(test)]
mod tests {
    //! Binding generation for the display layer.

    #[test]
    fn export_bindings() {
        // ts-rs writes TypeScript bindings for types marked #[ts(export)]
        // into the `bindings/` directory relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::GenomeId::export_all();
        let _ = crate::ids::PopulationId::export_all();
        let _ = crate::attribute::AttributeId::export_all();
        let _ = crate::attribute::AttributeKind::export_all();
        let _ = crate::attribute::AttributeValue::export_all();
        let _ = crate::stats::Extremum::export_all();
        let _ = crate::stats::AttributeSummary::export_all();
        let _ = crate::stats::AttributeStats::export_all();
        let _ = crate::stats::StatsSnapshot::export_all();
    }
}
