//! Display-ready projection of the current selection.
//!
//! [`PopulationReport`] carries exactly what the population panel shows:
//! id, size, age, age last improved, and per attribute the high holder,
//! the low holder, and the average (or "no data").

use core::fmt;

use genepool_types::{AttributeId, Extremum, PopulationId};
use serde::Serialize;
use ts_rs::TS;

use crate::loader::Selection;

/// Text shown for the "no data" marker.
pub const NO_DATA: &str = "no data";

/// Placeholder shown for a missing value.
pub const PLACEHOLDER: &str = "-";

/// One attribute row of a [`PopulationReport`].
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AttributeRow {
    /// The attribute.
    pub attribute: AttributeId,
    /// Highest-value holder and its value.
    pub high: Option<Extremum>,
    /// Lowest-value holder and its value.
    pub low: Option<Extremum>,
    /// Mean value, `None` for "no data".
    pub average: Option<f64>,
}

/// What the population panel renders for a selection.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PopulationReport {
    /// Population id.
    pub population_id: PopulationId,
    /// Number of genomes.
    pub size: usize,
    /// Generation counter.
    pub age: u64,
    /// Generation at which the population last improved.
    pub age_last_improved: u64,
    /// One row per tracked attribute, in registry order.
    pub attributes: Vec<AttributeRow>,
}

impl PopulationReport {
    /// Project a published selection.
    pub fn from_selection(selection: &Selection) -> Self {
        let population = selection.population();
        let attributes = selection
            .stats()
            .iter()
            .map(|entry| AttributeRow {
                attribute: entry.attribute.clone(),
                high: entry.summary.high().copied(),
                low: entry.summary.low().copied(),
                average: entry.summary.average(),
            })
            .collect();

        Self {
            population_id: population.id(),
            size: population.size(),
            age: population.age(),
            age_last_improved: population.age_last_improved(),
            attributes,
        }
    }

    /// Header label/value pairs.
    pub fn labels(&self) -> [(&'static str, String); 4] {
        [
            ("Id", self.population_id.to_string()),
            ("Size", self.size.to_string()),
            ("Age", self.age.to_string()),
            ("Age last improved", self.age_last_improved.to_string()),
        ]
    }

    /// Header labels shown when nothing is selected.
    pub fn empty_labels() -> [(&'static str, String); 4] {
        [
            ("Id", PLACEHOLDER.to_owned()),
            ("Size", PLACEHOLDER.to_owned()),
            ("Age", PLACEHOLDER.to_owned()),
            ("Age last improved", PLACEHOLDER.to_owned()),
        ]
    }

    /// Render the per-attribute text block.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PopulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.attributes {
            writeln!(f, "{}", row.attribute)?;
            writeln!(f, "\thigh    {}", extremum_cell(row.high.as_ref()))?;
            writeln!(f, "\tlow     {}", extremum_cell(row.low.as_ref()))?;
            match row.average {
                Some(avg) => writeln!(f, "\taverage : {avg}")?,
                None => writeln!(f, "\taverage : {NO_DATA}")?,
            }
        }
        Ok(())
    }
}

fn extremum_cell(extremum: Option<&Extremum>) -> String {
    extremum.map_or_else(
        || format!(": {PLACEHOLDER}"),
        |e| format!("({}) : {}", e.genome, e.value),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use genepool_store::{MemorySnapshotStore, SnapshotHandle};
    use genepool_types::{
        AttributeKind, AttributeRegistry, AttributeSpec, Genome, GenomeId, Population,
    };

    use super::*;
    use crate::loader::{GuardedLoader, SelectOutcome};

    async fn report_for(population: &Population) -> PopulationReport {
        let store = MemorySnapshotStore::new();
        let handle = SnapshotHandle::new("p.json").unwrap();
        store.insert_population(handle.clone(), population).unwrap();
        let loader = GuardedLoader::new(store);
        let SelectOutcome::Loaded(selection) = loader.select(Some(&handle)).await.unwrap() else {
            panic!("expected a published selection");
        };
        PopulationReport::from_selection(&selection)
    }

    fn registry() -> AttributeRegistry {
        AttributeRegistry::new(vec![
            AttributeSpec::new("fitness", AttributeKind::Float),
            AttributeSpec::new("complexity", AttributeKind::Integer),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn renders_extrema_and_no_data() {
        let g1 = Genome::new(GenomeId::new()).with_attribute("fitness", 5.5);
        let g2 = Genome::new(GenomeId::new()).with_attribute("fitness", 2.5);
        let (g1_id, g2_id) = (g1.id(), g2.id());
        let population =
            Population::new(PopulationId::new(), 8, 6, registry(), vec![g1, g2]).unwrap();

        let report = report_for(&population).await;
        assert_eq!(report.size, 2);
        assert_eq!(report.age, 8);
        assert_eq!(report.age_last_improved, 6);

        let expected = format!(
            "fitness\n\thigh    ({g1_id}) : 5.5\n\tlow     ({g2_id}) : 2.5\n\taverage : 4\n\
             complexity\n\thigh    : -\n\tlow     : -\n\taverage : no data\n"
        );
        assert_eq!(report.render(), expected);
        assert_eq!(format!("Populations\n{report}"), format!("Populations\n{expected}"));
    }

    #[tokio::test]
    async fn empty_population_renders_nothing() {
        let population =
            Population::new(PopulationId::new(), 0, 0, registry(), Vec::new()).unwrap();
        let report = report_for(&population).await;
        assert_eq!(report.size, 0);
        assert!(report.attributes.is_empty());
        assert_eq!(report.render(), "");
    }

    #[tokio::test]
    async fn labels_show_header_values() {
        let population =
            Population::new(PopulationId::new(), 4, 1, registry(), Vec::new()).unwrap();
        let report = report_for(&population).await;
        let labels = report.labels();
        assert_eq!(labels[0], ("Id", population.id().to_string()));
        assert_eq!(labels[1], ("Size", "0".to_owned()));
        assert_eq!(labels[3], ("Age last improved", "1".to_owned()));
        assert!(
            PopulationReport::empty_labels()
                .iter()
                .all(|(_, value)| value == PLACEHOLDER)
        );
    }
}
