//! The population aggregate: genomes in insertion order plus age counters
//! and the registry of tracked attributes.
//!
//! [`Population::new`] is the only way to build a population and enforces
//! every invariant up front:
//!
//! - genome ids are unique
//! - `age_last_improved <= age`
//! - every genome attribute is tracked and matches its declared kind
//!
//! After construction the genome collection is read-only. The single
//! mutation allowed is installing freshly computed statistics via
//! [`Population::install_stats`], which backs the
//! [`highest_genome`](Population::highest_genome) style lookups.

use std::collections::BTreeMap;

use crate::attribute::{AttributeId, AttributeRegistry};
use crate::error::PopulationError;
use crate::genome::Genome;
use crate::ids::{GenomeId, PopulationId};
use crate::stats::StatsSnapshot;

/// A loaded population snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    id: PopulationId,
    age: u64,
    age_last_improved: u64,
    registry: AttributeRegistry,
    genomes: Vec<Genome>,
    index: BTreeMap<GenomeId, usize>,
    stats: Option<StatsSnapshot>,
}

impl Population {
    /// Build a population, validating all invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`PopulationError`] describing the first violated
    /// invariant.
    pub fn new(
        id: PopulationId,
        age: u64,
        age_last_improved: u64,
        registry: AttributeRegistry,
        genomes: Vec<Genome>,
    ) -> Result<Self, PopulationError> {
        if age_last_improved > age {
            return Err(PopulationError::AgeOrdering {
                age,
                age_last_improved,
            });
        }

        let mut index = BTreeMap::new();
        for (position, genome) in genomes.iter().enumerate() {
            if index.insert(genome.id(), position).is_some() {
                return Err(PopulationError::DuplicateGenome(genome.id()));
            }
            for (attribute, value) in genome.attributes() {
                let Some(expected) = registry.kind_of(attribute) else {
                    return Err(PopulationError::UntrackedAttribute {
                        genome: genome.id(),
                        attribute: attribute.clone(),
                    });
                };
                if value.kind() != expected {
                    return Err(PopulationError::KindMismatch {
                        genome: genome.id(),
                        attribute: attribute.clone(),
                        expected,
                        found: value.kind(),
                    });
                }
            }
        }

        Ok(Self {
            id,
            age,
            age_last_improved,
            registry,
            genomes,
            index,
            stats: None,
        })
    }

    /// The population id.
    pub const fn id(&self) -> PopulationId {
        self.id
    }

    /// Number of genomes.
    pub const fn size(&self) -> usize {
        self.genomes.len()
    }

    /// Whether the population holds no genomes.
    pub const fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Generation counter of the evolution run.
    pub const fn age(&self) -> u64 {
        self.age
    }

    /// Generation at which the population last improved.
    pub const fn age_last_improved(&self) -> u64 {
        self.age_last_improved
    }

    /// The tracked attribute registry.
    pub const fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    /// Tracked attribute ids in registry order.
    pub fn attribute_ids(&self) -> impl Iterator<Item = &AttributeId> {
        self.registry.ids()
    }

    /// Genomes in population order.
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Look up a genome by id.
    pub fn genome(&self, id: GenomeId) -> Option<&Genome> {
        self.index.get(&id).and_then(|&i| self.genomes.get(i))
    }

    /// The most recently installed statistics, if any.
    pub const fn stats(&self) -> Option<&StatsSnapshot> {
        self.stats.as_ref()
    }

    /// Install statistics computed from this population, replacing any
    /// earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`PopulationError::StatsMismatch`] if `stats` was computed
    /// from a different population.
    pub fn install_stats(&mut self, stats: StatsSnapshot) -> Result<(), PopulationError> {
        if stats.population_id != self.id {
            return Err(PopulationError::StatsMismatch {
                expected: self.id,
                found: stats.population_id,
            });
        }
        self.stats = Some(stats);
        Ok(())
    }

    /// Genome with the highest value of `attribute`.
    ///
    /// `None` until statistics are installed, or when no genome defines it.
    pub fn highest_genome(&self, attribute: &AttributeId) -> Option<&Genome> {
        let entry = self.stats.as_ref()?.get(attribute)?;
        self.genome(entry.summary.high()?.genome)
    }

    /// Genome with the lowest value of `attribute`.
    ///
    /// `None` until statistics are installed, or when no genome defines it.
    pub fn lowest_genome(&self, attribute: &AttributeId) -> Option<&Genome> {
        let entry = self.stats.as_ref()?.get(attribute)?;
        self.genome(entry.summary.low()?.genome)
    }

    /// Mean value of `attribute`.
    ///
    /// `None` until statistics are installed, or when no genome defines it.
    pub fn average_attribute(&self, attribute: &AttributeId) -> Option<f64> {
        self.stats.as_ref()?.get(attribute)?.summary.average()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::attribute::{AttributeKind, AttributeSpec, AttributeValue};
    use crate::stats::{AttributeStats, AttributeSummary, Extremum};

    fn fitness_registry() -> AttributeRegistry {
        AttributeRegistry::new(vec![AttributeSpec::new("fitness", AttributeKind::Float)]).unwrap()
    }

    #[test]
    fn preserves_insertion_order_and_indexes_by_id() {
        let a = Genome::new(GenomeId::new()).with_attribute("fitness", 1.0);
        let b = Genome::new(GenomeId::new()).with_attribute("fitness", 2.0);
        let (a_id, b_id) = (a.id(), b.id());
        let pop = Population::new(PopulationId::new(), 4, 2, fitness_registry(), vec![b, a])
            .unwrap();
        let order: Vec<GenomeId> = pop.genomes().iter().map(Genome::id).collect();
        assert_eq!(order, vec![b_id, a_id]);
        assert_eq!(pop.genome(a_id).map(Genome::id), Some(a_id));
        assert_eq!(pop.size(), 2);
        assert_eq!(pop.age(), 4);
        assert_eq!(pop.age_last_improved(), 2);
    }

    #[test]
    fn rejects_duplicate_genome_ids() {
        let id = GenomeId::new();
        let result = Population::new(
            PopulationId::new(),
            0,
            0,
            fitness_registry(),
            vec![Genome::new(id), Genome::new(id)],
        );
        assert_eq!(result, Err(PopulationError::DuplicateGenome(id)));
    }

    #[test]
    fn rejects_improvement_after_age() {
        let result = Population::new(PopulationId::new(), 3, 5, fitness_registry(), Vec::new());
        assert_eq!(
            result,
            Err(PopulationError::AgeOrdering {
                age: 3,
                age_last_improved: 5
            })
        );
    }

    #[test]
    fn rejects_untracked_and_mistyped_attributes() {
        let untracked = Genome::new(GenomeId::new()).with_attribute("speed", 1.0);
        assert!(matches!(
            Population::new(PopulationId::new(), 0, 0, fitness_registry(), vec![untracked]),
            Err(PopulationError::UntrackedAttribute { .. })
        ));

        let mistyped = Genome::new(GenomeId::new()).with_attribute("fitness", 7_i64);
        assert!(matches!(
            Population::new(PopulationId::new(), 0, 0, fitness_registry(), vec![mistyped]),
            Err(PopulationError::KindMismatch {
                expected: AttributeKind::Float,
                found: AttributeKind::Integer,
                ..
            })
        ));
    }

    #[test]
    fn lookups_need_installed_stats() {
        let genome = Genome::new(GenomeId::new()).with_attribute("fitness", 5.0);
        let genome_id = genome.id();
        let mut pop =
            Population::new(PopulationId::new(), 1, 1, fitness_registry(), vec![genome]).unwrap();
        let fitness = AttributeId::new("fitness");
        assert!(pop.highest_genome(&fitness).is_none());

        let extremum = Extremum {
            genome: genome_id,
            value: AttributeValue::Float(5.0),
        };
        let stats = StatsSnapshot::new(
            pop.id(),
            vec![AttributeStats {
                attribute: fitness.clone(),
                summary: AttributeSummary::Measured {
                    high: extremum,
                    low: extremum,
                    average: 5.0,
                },
            }],
        );
        pop.install_stats(stats).unwrap();
        assert_eq!(pop.highest_genome(&fitness).map(Genome::id), Some(genome_id));
        assert_eq!(pop.lowest_genome(&fitness).map(Genome::id), Some(genome_id));
        assert!(pop.average_attribute(&fitness).is_some());
    }

    #[test]
    fn refuses_stats_from_another_population() {
        let mut pop =
            Population::new(PopulationId::new(), 0, 0, fitness_registry(), Vec::new()).unwrap();
        let foreign = StatsSnapshot::new(PopulationId::new(), Vec::new());
        assert!(matches!(
            pop.install_stats(foreign),
            Err(PopulationError::StatsMismatch { .. })
        ));
        assert!(pop.stats().is_none());
    }
}
