//! The stats engine.
//!
//! [`StatsEngine::compute`] is pure. [`StatsEngine::refresh_stats`] also
//! installs the result on the population so its `highest_genome` /
//! `lowest_genome` / `average_attribute` lookups reflect it. Refreshing an
//! unchanged population twice installs identical statistics.

use core::cmp::Ordering;

use genepool_types::{
    AttributeId, AttributeStats, AttributeSummary, Extremum, Genome, Population, PopulationError,
    StatsSnapshot,
};
use tracing::debug;

/// Computes per-attribute statistics for populations.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsEngine;

impl StatsEngine {
    /// Compute statistics for every tracked attribute of `population`.
    ///
    /// An empty population yields a snapshot with no entries.
    pub fn compute(population: &Population) -> StatsSnapshot {
        if population.is_empty() {
            return StatsSnapshot::new(population.id(), Vec::new());
        }

        let attributes = population
            .attribute_ids()
            .map(|attribute| AttributeStats {
                attribute: attribute.clone(),
                summary: Self::summarize(population.genomes(), attribute),
            })
            .collect();

        StatsSnapshot::new(population.id(), attributes)
    }

    /// Recompute statistics and install them on `population`.
    ///
    /// Age counters are stored fields and are left untouched; the genome
    /// collection is never modified.
    ///
    /// # Errors
    ///
    /// Propagates [`PopulationError::StatsMismatch`] from installation,
    /// which cannot occur for statistics computed here.
    pub fn refresh_stats(population: &mut Population) -> Result<StatsSnapshot, PopulationError> {
        let stats = Self::compute(population);
        population.install_stats(stats.clone())?;
        debug!(
            population_id = %population.id(),
            genomes = population.size(),
            attributes = stats.len(),
            "Refreshed population stats"
        );
        Ok(stats)
    }

    /// Summarize a single attribute across `genomes` in the given order.
    pub fn summarize(genomes: &[Genome], attribute: &AttributeId) -> AttributeSummary {
        let mut high: Option<Extremum> = None;
        let mut low: Option<Extremum> = None;
        let mut sum = 0.0_f64;
        let mut count: u64 = 0;

        for genome in genomes {
            let Some(value) = genome.attribute(attribute) else {
                continue;
            };
            if !value.is_defined() {
                continue;
            }
            let candidate = Extremum {
                genome: genome.id(),
                value,
            };

            match high {
                Some(current) if value.compare(&current.value) != Some(Ordering::Greater) => {}
                _ => high = Some(candidate),
            }
            match low {
                Some(current) if value.compare(&current.value) != Some(Ordering::Less) => {}
                _ => low = Some(candidate),
            }

            sum += value.as_f64();
            count = count.saturating_add(1);
        }

        match (high, low) {
            (Some(high), Some(low)) if count > 0 => AttributeSummary::Measured {
                high,
                low,
                average: mean(sum, count),
            },
            _ => AttributeSummary::NoData,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(sum: f64, count: u64) -> f64 {
    sum / count as f64
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::arithmetic_side_effects)]
mod tests {
    use genepool_types::{
        AttributeKind, AttributeRegistry, AttributeSpec, AttributeValue, GenomeId, PopulationId,
    };

    use super::*;

    fn registry() -> AttributeRegistry {
        AttributeRegistry::new(vec![
            AttributeSpec::new("fitness", AttributeKind::Float),
            AttributeSpec::new("complexity", AttributeKind::Integer),
        ])
        .unwrap()
    }

    fn population(genomes: Vec<Genome>) -> Population {
        Population::new(PopulationId::new(), 10, 7, registry(), genomes).unwrap()
    }

    fn fitness() -> AttributeId {
        AttributeId::new("fitness")
    }

    #[test]
    fn first_genome_wins_ties() {
        let g1 = Genome::new(GenomeId::new()).with_attribute("fitness", 5.0);
        let g2 = Genome::new(GenomeId::new()).with_attribute("fitness", 5.0);
        let g3 = Genome::new(GenomeId::new()).with_attribute("fitness", 2.0);
        let (g1_id, g3_id) = (g1.id(), g3.id());
        let pop = population(vec![g1, g2, g3]);

        let stats = StatsEngine::compute(&pop);
        let summary = stats.get(&fitness()).unwrap().summary;
        let high = summary.high().unwrap();
        let low = summary.low().unwrap();
        assert_eq!(high.genome, g1_id);
        assert_eq!(high.value, AttributeValue::Float(5.0));
        assert_eq!(low.genome, g3_id);
        assert_eq!(low.value, AttributeValue::Float(2.0));
        assert_eq!(summary.average(), Some(4.0));
    }

    #[test]
    fn tie_on_minimum_keeps_first_holder() {
        let g1 = Genome::new(GenomeId::new()).with_attribute("complexity", 9_i64);
        let g2 = Genome::new(GenomeId::new()).with_attribute("complexity", 1_i64);
        let g3 = Genome::new(GenomeId::new()).with_attribute("complexity", 1_i64);
        let g2_id = g2.id();
        let pop = population(vec![g1, g2, g3]);

        let stats = StatsEngine::compute(&pop);
        let summary = stats.get(&AttributeId::new("complexity")).unwrap().summary;
        assert_eq!(summary.low().unwrap().genome, g2_id);
        assert_eq!(summary.low().unwrap().value, AttributeValue::Integer(1));
    }

    #[test]
    fn undefined_everywhere_reports_no_data() {
        let pop = population(vec![
            Genome::new(GenomeId::new()),
            Genome::new(GenomeId::new()),
        ]);
        let stats = StatsEngine::compute(&pop);
        let summary = stats.get(&fitness()).unwrap().summary;
        assert!(summary.is_no_data());
        assert!(summary.high().is_none());
        assert!(summary.low().is_none());
        assert_eq!(summary.average(), None);
    }

    #[test]
    fn empty_population_has_no_entries() {
        let pop = population(Vec::new());
        let stats = StatsEngine::compute(&pop);
        assert!(stats.is_empty());
        assert_eq!(stats.population_id, pop.id());
    }

    #[test]
    fn skips_undefined_and_nan_values() {
        let g1 = Genome::new(GenomeId::new()).with_attribute("fitness", f64::NAN);
        let g2 = Genome::new(GenomeId::new());
        let g3 = Genome::new(GenomeId::new()).with_attribute("fitness", 3.0);
        let g4 = Genome::new(GenomeId::new()).with_attribute("fitness", 1.0);
        let (g3_id, g4_id) = (g3.id(), g4.id());
        let pop = population(vec![g1, g2, g3, g4]);

        let summary = StatsEngine::compute(&pop).get(&fitness()).unwrap().summary;
        assert_eq!(summary.high().unwrap().genome, g3_id);
        assert_eq!(summary.low().unwrap().genome, g4_id);
        assert_eq!(summary.average(), Some(2.0));
    }

    #[test]
    fn only_nan_values_report_no_data() {
        let pop = population(vec![
            Genome::new(GenomeId::new()).with_attribute("fitness", f64::NAN),
        ]);
        let summary = StatsEngine::compute(&pop).get(&fitness()).unwrap().summary;
        assert!(summary.is_no_data());
    }

    #[test]
    fn entries_follow_registry_order() {
        let pop = population(vec![
            Genome::new(GenomeId::new())
                .with_attribute("complexity", 4_i64)
                .with_attribute("fitness", 0.5),
        ]);
        let stats = StatsEngine::compute(&pop);
        let names: Vec<&str> = stats.iter().map(|s| s.attribute.as_str()).collect();
        assert_eq!(names, vec!["fitness", "complexity"]);
    }

    #[test]
    fn integer_average_is_fractional() {
        let pop = population(vec![
            Genome::new(GenomeId::new()).with_attribute("complexity", 1_i64),
            Genome::new(GenomeId::new()).with_attribute("complexity", 2_i64),
        ]);
        let summary = StatsEngine::compute(&pop)
            .get(&AttributeId::new("complexity"))
            .unwrap()
            .summary;
        assert_eq!(summary.average(), Some(1.5));
    }

    #[test]
    fn mean_counts_past_u32_range() {
        let count = u64::from(u32::MAX) + 1;
        assert_eq!(mean(3.0 * 4_294_967_296.0, count), 3.0);
    }

    #[test]
    fn refresh_is_idempotent_and_installs_stats() {
        let mut pop = population(vec![
            Genome::new(GenomeId::new()).with_attribute("fitness", 0.1),
            Genome::new(GenomeId::new()).with_attribute("fitness", 0.2),
            Genome::new(GenomeId::new()).with_attribute("fitness", 0.7),
        ]);
        let first = StatsEngine::refresh_stats(&mut pop).unwrap();
        let second = StatsEngine::refresh_stats(&mut pop).unwrap();
        assert_eq!(first, second);
        assert_eq!(pop.stats(), Some(&second));
        assert_eq!(pop.age(), 10);
        assert_eq!(pop.age_last_improved(), 7);

        let avg = pop.average_attribute(&fitness()).unwrap();
        let expected = first.get(&fitness()).unwrap().summary.average().unwrap();
        assert_eq!(avg.to_bits(), expected.to_bits());
        let best = pop
            .highest_genome(&fitness())
            .and_then(|g| g.attribute(&fitness()));
        assert_eq!(best, Some(AttributeValue::Float(0.7)));
    }
}
