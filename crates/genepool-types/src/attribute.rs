//! Genome attribute identifiers, declared numeric kinds, and the registry
//! of attributes a population tracks.
//!
//! Attribute lookups are typed: every tracked [`AttributeId`] declares an
//! [`AttributeKind`] in the population's [`AttributeRegistry`], and every
//! [`AttributeValue`] stored on a genome is checked against that kind when
//! the population is constructed.

use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::PopulationError;

/// Name of a numeric genome attribute (e.g. `fitness`, `complexity`).
///
/// Equality is by value: two ids with the same name are the same attribute.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct AttributeId(String);

impl AttributeId {
    /// Create an attribute id from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The attribute name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttributeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Declared numeric type of a tracked attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AttributeKind {
    /// Signed 64-bit integer values.
    Integer,
    /// 64-bit floating-point values.
    Float,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
        }
    }
}

/// A typed attribute value held by a genome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum AttributeValue {
    /// An integer attribute value.
    Integer(i64),
    /// A floating-point attribute value.
    Float(f64),
}

impl AttributeValue {
    /// The kind this value belongs to.
    pub const fn kind(&self) -> AttributeKind {
        match self {
            Self::Integer(_) => AttributeKind::Integer,
            Self::Float(_) => AttributeKind::Float,
        }
    }

    /// Whether the value takes part in statistics. NaN floats do not.
    pub fn is_defined(&self) -> bool {
        match self {
            Self::Integer(_) => true,
            Self::Float(v) => !v.is_nan(),
        }
    }

    /// The value widened to `f64` for averaging.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Integer(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    /// Total order between two values of the same kind.
    ///
    /// Integers compare numerically, floats by [`f64::total_cmp`]. Returns
    /// `None` when the kinds differ.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => Some(a.total_cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// A tracked attribute and its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    /// The attribute identifier.
    pub id: AttributeId,
    /// The declared numeric kind.
    pub kind: AttributeKind,
}

impl AttributeSpec {
    /// Create a new attribute spec.
    pub fn new(id: impl Into<AttributeId>, kind: AttributeKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// The ordered set of attributes a population tracks.
///
/// Declaration order is preserved and is the order in which statistics
/// are reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeRegistry {
    specs: Vec<AttributeSpec>,
}

impl AttributeRegistry {
    /// Build a registry from attribute specs in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`PopulationError::DuplicateAttribute`] if an attribute id is
    /// declared twice.
    pub fn new(specs: Vec<AttributeSpec>) -> Result<Self, PopulationError> {
        for (i, spec) in specs.iter().enumerate() {
            if specs.iter().take(i).any(|earlier| earlier.id == spec.id) {
                return Err(PopulationError::DuplicateAttribute(spec.id.clone()));
            }
        }
        Ok(Self { specs })
    }

    /// An empty registry.
    pub const fn empty() -> Self {
        Self { specs: Vec::new() }
    }

    /// The declared kind of `id`, or `None` if it is not tracked.
    pub fn kind_of(&self, id: &AttributeId) -> Option<AttributeKind> {
        self.specs.iter().find(|s| &s.id == id).map(|s| s.kind)
    }

    /// Whether `id` is tracked.
    pub fn contains(&self, id: &AttributeId) -> bool {
        self.kind_of(id).is_some()
    }

    /// Tracked attribute ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &AttributeId> {
        self.specs.iter().map(|s| &s.id)
    }

    /// Tracked attribute specs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.specs.iter()
    }

    /// Number of tracked attributes.
    pub const fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether no attribute is tracked.
    pub const fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
