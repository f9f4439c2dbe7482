//! A single evolved candidate and its named numeric attributes.

use std::collections::BTreeMap;

use crate::attribute::{AttributeId, AttributeValue};
use crate::ids::GenomeId;

/// An evolved candidate with typed attribute values.
///
/// Genomes are immutable once they are part of a [`Population`]. Attributes
/// that were never recorded are undefined and read back as `None`.
///
/// [`Population`]: crate::population::Population
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    id: GenomeId,
    attributes: BTreeMap<AttributeId, AttributeValue>,
}

impl Genome {
    /// Create a genome with no attributes.
    pub const fn new(id: GenomeId) -> Self {
        Self {
            id,
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style setter for a single attribute.
    #[must_use]
    pub fn with_attribute(
        mut self,
        attribute: impl Into<AttributeId>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(attribute.into(), value.into());
        self
    }

    /// The genome's id.
    pub const fn id(&self) -> GenomeId {
        self.id
    }

    /// The value of `attribute`, or `None` if the genome does not define it.
    pub fn attribute(&self, attribute: &AttributeId) -> Option<AttributeValue> {
        self.attributes.get(attribute).copied()
    }

    /// All defined attributes, ordered by attribute id.
    pub fn attributes(&self) -> impl Iterator<Item = (&AttributeId, &AttributeValue)> {
        self.attributes.iter()
    }
}
