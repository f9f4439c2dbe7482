//! The JSON snapshot document and its conversion to and from [`Population`].
//!
//! ```json
//! {
//!   "id": "0190f7a2-...",
//!   "age": 12,
//!   "age_last_improved": 9,
//!   "attributes": [{ "id": "fitness", "kind": "float" }],
//!   "genomes": [{ "id": "0190f7a2-...", "attributes": { "fitness": 5.0 } }]
//! }
//! ```
//!
//! A `null` value or a missing key leaves the attribute undefined for that
//! genome. Values are typed by the declared kind at decode time; anything
//! that does not fit is a [`DecodeError::Schema`].

use std::collections::BTreeMap;

use genepool_types::{
    AttributeId, AttributeKind, AttributeRegistry, AttributeSpec, AttributeValue, Genome,
    GenomeId, Population, PopulationError, PopulationId,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;

/// On-disk shape of a population snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// Population id.
    pub id: PopulationId,
    /// Generation counter.
    pub age: u64,
    /// Generation at which the population last improved.
    #[serde(default)]
    pub age_last_improved: u64,
    /// Tracked attributes in display order.
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,
    /// Genomes in population order.
    #[serde(default)]
    pub genomes: Vec<GenomeDocument>,
}

/// On-disk shape of a single genome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeDocument {
    /// Genome id.
    pub id: GenomeId,
    /// Raw attribute values keyed by attribute id.
    #[serde(default)]
    pub attributes: BTreeMap<AttributeId, Value>,
}

/// Decode a snapshot document into a validated population.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] for invalid JSON,
/// [`DecodeError::Schema`] for mistyped values, and
/// [`DecodeError::Invariant`] if the result violates population invariants.
pub fn decode_population(bytes: &[u8]) -> Result<Population, DecodeError> {
    let document: SnapshotDocument = serde_json::from_slice(bytes)?;
    let registry = AttributeRegistry::new(document.attributes)?;

    let mut genomes = Vec::with_capacity(document.genomes.len());
    for raw in document.genomes {
        let mut genome = Genome::new(raw.id);
        for (attribute, value) in raw.attributes {
            if value.is_null() {
                continue;
            }
            let Some(kind) = registry.kind_of(&attribute) else {
                return Err(PopulationError::UntrackedAttribute {
                    genome: raw.id,
                    attribute,
                }
                .into());
            };
            let typed = typed_value(kind, &value).ok_or_else(|| DecodeError::Schema {
                genome: raw.id,
                attribute: attribute.clone(),
                expected: kind,
                found: value.to_string(),
            })?;
            genome = genome.with_attribute(attribute, typed);
        }
        genomes.push(genome);
    }

    Population::new(
        document.id,
        document.age,
        document.age_last_improved,
        registry,
        genomes,
    )
    .map_err(DecodeError::from)
}

/// Encode a population as a pretty-printed snapshot document.
///
/// NaN float values are written as `null`.
///
/// # Errors
///
/// Returns the serializer error if encoding fails.
pub fn encode_population(population: &Population) -> Result<Vec<u8>, serde_json::Error> {
    let document = SnapshotDocument {
        id: population.id(),
        age: population.age(),
        age_last_improved: population.age_last_improved(),
        attributes: population.registry().iter().cloned().collect(),
        genomes: population
            .genomes()
            .iter()
            .map(|genome| GenomeDocument {
                id: genome.id(),
                attributes: genome
                    .attributes()
                    .map(|(attribute, value)| (attribute.clone(), json_value(*value)))
                    .collect(),
            })
            .collect(),
    };
    serde_json::to_vec_pretty(&document)
}

fn typed_value(kind: AttributeKind, value: &Value) -> Option<AttributeValue> {
    match kind {
        AttributeKind::Integer => value.as_i64().map(AttributeValue::Integer),
        AttributeKind::Float => value.as_f64().map(AttributeValue::Float),
    }
}

fn json_value(value: AttributeValue) -> Value {
    match value {
        AttributeValue::Integer(v) => Value::from(v),
        AttributeValue::Float(v) => serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number),
    }
}
