//! Error types for population construction.
//!
//! Every way a population can fail its invariants is a [`PopulationError`].
//! Snapshot decoding surfaces these as decode failures; they are never
//! silently accepted.

use crate::attribute::{AttributeId, AttributeKind};
use crate::ids::{GenomeId, PopulationId};

/// A population invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PopulationError {
    /// Two genomes share the same id.
    #[error("duplicate genome id: {0}")]
    DuplicateGenome(GenomeId),

    /// An attribute was declared twice in the registry.
    #[error("duplicate attribute id: {0}")]
    DuplicateAttribute(AttributeId),

    /// The population improved after its current age.
    #[error("age last improved ({age_last_improved}) exceeds age ({age})")]
    AgeOrdering {
        /// Population age.
        age: u64,
        /// Age at which the population last improved.
        age_last_improved: u64,
    },

    /// A genome defines an attribute the registry does not track.
    #[error("genome {genome} defines untracked attribute {attribute}")]
    UntrackedAttribute {
        /// The offending genome.
        genome: GenomeId,
        /// The untracked attribute.
        attribute: AttributeId,
    },

    /// A genome value does not match the attribute's declared kind.
    #[error("genome {genome} attribute {attribute}: expected {expected}, found {found}")]
    KindMismatch {
        /// The offending genome.
        genome: GenomeId,
        /// The attribute whose value is mistyped.
        attribute: AttributeId,
        /// Kind declared by the registry.
        expected: AttributeKind,
        /// Kind of the stored value.
        found: AttributeKind,
    },

    /// Statistics computed for one population were installed on another.
    #[error("stats for population {found} cannot be installed on population {expected}")]
    StatsMismatch {
        /// The population receiving the stats.
        expected: PopulationId,
        /// The population the stats were computed from.
        found: PopulationId,
    },
}
