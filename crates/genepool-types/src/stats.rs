//! Derived per-attribute statistics of a population.
//!
//! A [`StatsSnapshot`] is never persisted. It is recomputed from a single
//! population and records that population's id so a snapshot can never be
//! paired with a different population.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::attribute::{AttributeId, AttributeValue};
use crate::ids::{GenomeId, PopulationId};

/// The genome holding an extreme value of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Extremum {
    /// The extremum holder.
    pub genome: GenomeId,
    /// The holder's value.
    pub value: AttributeValue,
}

/// Summary of one attribute across a population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AttributeSummary {
    /// No genome defines the attribute.
    NoData,
    /// At least one genome defines the attribute.
    Measured {
        /// Genome with the highest value (first in population order on ties).
        high: Extremum,
        /// Genome with the lowest value (first in population order on ties).
        low: Extremum,
        /// Arithmetic mean over the genomes defining the attribute.
        average: f64,
    },
}

impl AttributeSummary {
    /// Highest-value holder, if any genome defines the attribute.
    pub const fn high(&self) -> Option<&Extremum> {
        match self {
            Self::NoData => None,
            Self::Measured { high, .. } => Some(high),
        }
    }

    /// Lowest-value holder, if any genome defines the attribute.
    pub const fn low(&self) -> Option<&Extremum> {
        match self {
            Self::NoData => None,
            Self::Measured { low, .. } => Some(low),
        }
    }

    /// Mean value, or `None` for the "no data" marker.
    pub const fn average(&self) -> Option<f64> {
        match self {
            Self::NoData => None,
            Self::Measured { average, .. } => Some(*average),
        }
    }

    /// Whether this is the "no data" marker.
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// Statistics for a single tracked attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AttributeStats {
    /// The attribute.
    pub attribute: AttributeId,
    /// Extrema and average, or "no data".
    pub summary: AttributeSummary,
}

/// Per-attribute statistics of one population, in registry order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StatsSnapshot {
    /// The population these statistics were computed from.
    pub population_id: PopulationId,
    /// One entry per tracked attribute. Empty for an empty population.
    pub attributes: Vec<AttributeStats>,
}

impl StatsSnapshot {
    /// Create a snapshot from computed entries.
    pub const fn new(population_id: PopulationId, attributes: Vec<AttributeStats>) -> Self {
        Self {
            population_id,
            attributes,
        }
    }

    /// Statistics for `attribute`, if it has an entry.
    pub fn get(&self, attribute: &AttributeId) -> Option<&AttributeStats> {
        self.attributes.iter().find(|s| &s.attribute == attribute)
    }

    /// Entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeStats> {
        self.attributes.iter()
    }

    /// Number of attribute entries.
    pub const fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether there are no entries.
    pub const fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
