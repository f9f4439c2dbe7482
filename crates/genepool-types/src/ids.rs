//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Genomes and populations carry strongly-typed IDs so a genome id can never
//! be passed where a population id is expected. Fresh ids use UUID v7
//! (time-ordered); decoded snapshots may carry any UUID version.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a genome within a population snapshot.
    GenomeId
}

define_id! {
    /// Unique identifier for a population snapshot.
    PopulationId
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let genome = GenomeId::new();
        let population = PopulationId::new();
        // Different types -- the compiler enforces no mixing.
        assert_ne!(genome.into_inner(), Uuid::nil());
        assert_ne!(population.into_inner(), Uuid::nil());
    }

    #[test]
    fn fresh_ids_are_unique() {
        assert_ne!(GenomeId::new(), GenomeId::new());
    }

    #[test]
    fn display_matches_inner_uuid() {
        let raw = Uuid::now_v7();
        assert_eq!(PopulationId::from(raw).to_string(), raw.to_string());
    }

    #[test]
    fn serializes_as_bare_uuid() {
        let raw = Uuid::nil();
        let json = serde_json::to_string(&GenomeId::from(raw)).unwrap();
        assert_eq!(json, format!("\"{raw}\""));
    }
}
