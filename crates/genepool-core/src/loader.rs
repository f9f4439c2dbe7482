//! Guarded population loading.
//!
//! [`GuardedLoader`] serializes snapshot loads through a single exclusive
//! section and publishes each successful load as one immutable
//! [`Selection`] (population plus its statistics).
//!
//! # State machine
//!
//! ```text
//!   Idle / Ready / Failed --select--> Loading --ok--------> Ready(selection)
//!                                        |
//!                                        +--not found----> Failed(Unavailable)
//!                                        +--decode error-> Failed(Rejected)
//!                                        +--cancel/panic-> Failed(Interrupted)
//!   any --clear--> Idle
//! ```
//!
//! # Concurrency
//!
//! The store lives inside a [`tokio::sync::Mutex`]; holding that mutex is
//! the exclusive section. A `select` holds it across the store read, the
//! stats refresh, and publication, so loads run one at a time in arrival
//! order and are never preempted. The guard is scoped to `select`, so the
//! section is released on every exit path including a panicking store.
//! A load that ends without completing (the caller dropped the `select`
//! future, or the store panicked) leaves the state at `Failed(Interrupted)`
//! rather than `Loading`.
//!
//! Publication swaps an `Arc<Selection>` under a short reader/writer lock
//! that is never held across I/O. Readers ([`GuardedLoader::current`] and
//! friends) only take that lock, so they never wait for a load in
//! progress. They may see the previous selection during a load, but never
//! a population paired with another population's statistics.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use genepool_stats::StatsEngine;
use genepool_store::{SnapshotHandle, SnapshotStore, StoreError};
use genepool_types::{Population, StatsSnapshot};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::error::LoadError;

/// A published population together with the statistics computed from it.
#[derive(Debug)]
pub struct Selection {
    handle: SnapshotHandle,
    population: Arc<Population>,
    stats: Arc<StatsSnapshot>,
    loaded_at: DateTime<Utc>,
}

impl Selection {
    /// The snapshot this selection was loaded from.
    pub const fn handle(&self) -> &SnapshotHandle {
        &self.handle
    }

    /// The loaded population, with its statistics installed.
    pub const fn population(&self) -> &Arc<Population> {
        &self.population
    }

    /// Statistics computed from [`population`](Self::population).
    pub const fn stats(&self) -> &Arc<StatsSnapshot> {
        &self.stats
    }

    /// When the selection was published.
    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Why the last `select` did not publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// The snapshot was missing or the selection was unset. The previous
    /// selection is left untouched.
    Unavailable {
        /// The requested snapshot, `None` for an unset selection.
        handle: Option<SnapshotHandle>,
    },
    /// The snapshot could not be decoded or validated.
    Rejected {
        /// The requested snapshot.
        handle: SnapshotHandle,
        /// Human-readable cause.
        reason: String,
    },
    /// The load stopped before completing: the `select` future was
    /// dropped or the store panicked. Nothing was published.
    Interrupted {
        /// The requested snapshot.
        handle: SnapshotHandle,
    },
}

/// Observable state of a [`GuardedLoader`].
#[derive(Debug, Clone)]
pub enum LoaderState {
    /// Nothing has been selected since creation or the last clear.
    Idle,
    /// A load of this snapshot is in progress.
    Loading(SnapshotHandle),
    /// The last load succeeded and was published.
    Ready(Arc<Selection>),
    /// The last load did not publish.
    Failed(LoadFailure),
}

/// Result of a completed `select`.
#[derive(Debug, Clone)]
pub enum SelectOutcome {
    /// The snapshot was loaded and is now the current selection.
    Loaded(Arc<Selection>),
    /// The snapshot was not found or no snapshot was selected. Nothing was
    /// published.
    Unavailable,
}

#[derive(Debug)]
struct Published {
    state: LoaderState,
    current: Option<Arc<Selection>>,
    generation: u64,
}

/// Loads snapshots one at a time and publishes the current selection.
#[derive(Debug)]
pub struct GuardedLoader<S> {
    section: Mutex<S>,
    published: RwLock<Published>,
}

impl<S: SnapshotStore> GuardedLoader<S> {
    /// Create a loader that owns `store`.
    pub fn new(store: S) -> Self {
        Self {
            section: Mutex::new(store),
            published: RwLock::new(Published {
                state: LoaderState::Idle,
                current: None,
                generation: 0,
            }),
        }
    }

    /// Load `handle`, refresh its statistics, and publish the pair.
    ///
    /// Waits for any load already in progress. `None` is an unset
    /// selection and, like a missing snapshot, returns
    /// [`SelectOutcome::Unavailable`] without touching the current
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Decode`] if the snapshot exists but is not a
    /// valid population. The current selection is left untouched.
    ///
    /// # Cancellation
    ///
    /// Dropping the returned future abandons the load, releases the
    /// section, and leaves the state at [`LoadFailure::Interrupted`] with
    /// the current selection untouched.
    pub async fn select(
        &self,
        handle: Option<&SnapshotHandle>,
    ) -> Result<SelectOutcome, LoadError> {
        let store = self.section.lock().await;
        debug!(handle = ?handle.map(ToString::to_string), "Acquired loader section");

        let Some(handle) = handle else {
            self.write().state = LoaderState::Failed(LoadFailure::Unavailable { handle: None });
            return Ok(SelectOutcome::Unavailable);
        };

        self.write().state = LoaderState::Loading(handle.clone());
        let in_flight = InFlight {
            loader: self,
            handle: Some(handle.clone()),
        };

        let result = match store.load(handle).await {
            Ok(population) => self.publish(handle, population),
            Err(StoreError::NotFound { source, .. }) => {
                debug!(
                    %handle,
                    error = ?source.map(|e| e.to_string()),
                    "Snapshot not found, keeping current selection"
                );
                self.write().state = LoaderState::Failed(LoadFailure::Unavailable {
                    handle: Some(handle.clone()),
                });
                Ok(SelectOutcome::Unavailable)
            }
            Err(StoreError::Decode { source, .. }) => {
                warn!(%handle, error = %source, "Failed to decode snapshot");
                self.reject(handle, source.to_string());
                Err(LoadError::Decode {
                    handle: handle.clone(),
                    source,
                })
            }
            Err(other) => {
                warn!(%handle, error = %other, "Snapshot store failed");
                self.reject(handle, other.to_string());
                Err(LoadError::Store { source: other })
            }
        };
        in_flight.finish();
        result
    }

    /// Reset the current selection to absent and the state to idle.
    ///
    /// Waits for any load in progress so a finishing load cannot
    /// republish after the clear.
    pub async fn clear(&self) {
        let _section = self.section.lock().await;
        let mut published = self.write();
        published.current = None;
        published.state = LoaderState::Idle;
        info!("Cleared current population");
    }

    /// Enter the exclusive section and borrow the store.
    pub(crate) async fn lock_store(&self) -> MutexGuard<'_, S> {
        self.section.lock().await
    }

    fn publish(
        &self,
        handle: &SnapshotHandle,
        mut population: Population,
    ) -> Result<SelectOutcome, LoadError> {
        let stats = match StatsEngine::refresh_stats(&mut population) {
            Ok(stats) => stats,
            Err(source) => {
                warn!(%handle, error = %source, "Failed to refresh population stats");
                self.reject(handle, source.to_string());
                return Err(LoadError::Stats {
                    handle: handle.clone(),
                    source,
                });
            }
        };

        let selection = Arc::new(Selection {
            handle: handle.clone(),
            population: Arc::new(population),
            stats: Arc::new(stats),
            loaded_at: Utc::now(),
        });

        {
            let mut published = self.write();
            published.current = Some(Arc::clone(&selection));
            published.state = LoaderState::Ready(Arc::clone(&selection));
            published.generation = published.generation.saturating_add(1);
        }

        info!(
            %handle,
            population_id = %selection.population.id(),
            size = selection.population.size(),
            age = selection.population.age(),
            "Published population"
        );
        Ok(SelectOutcome::Loaded(selection))
    }

    fn reject(&self, handle: &SnapshotHandle, reason: String) {
        self.write().state = LoaderState::Failed(LoadFailure::Rejected {
            handle: handle.clone(),
            reason,
        });
    }
}

/// Moves the state out of `Loading` if a load ends without reaching a
/// completion arm.
struct InFlight<'a, S> {
    loader: &'a GuardedLoader<S>,
    handle: Option<SnapshotHandle>,
}

impl<S> InFlight<'_, S> {
    fn finish(mut self) {
        self.handle = None;
    }
}

impl<S> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            warn!(%handle, "Snapshot load interrupted");
            self.loader.write().state = LoaderState::Failed(LoadFailure::Interrupted { handle });
        }
    }
}

impl<S> GuardedLoader<S> {
    /// The current selection, population and statistics as one pair.
    pub fn current(&self) -> Option<Arc<Selection>> {
        self.read().current.clone()
    }

    /// The current population, if any.
    ///
    /// Use [`current`](Self::current) when the population and statistics
    /// must come from the same publication.
    pub fn current_population(&self) -> Option<Arc<Population>> {
        self.read()
            .current
            .as_ref()
            .map(|s| Arc::clone(&s.population))
    }

    /// The current statistics, if any.
    pub fn current_stats(&self) -> Option<Arc<StatsSnapshot>> {
        self.read().current.as_ref().map(|s| Arc::clone(&s.stats))
    }

    /// The loader's observable state.
    pub fn state(&self) -> LoaderState {
        self.read().state.clone()
    }

    /// Number of successful publications so far.
    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    fn read(&self) -> RwLockReadGuard<'_, Published> {
        self.published.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Published> {
        self.published.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use genepool_store::MemorySnapshotStore;
    use genepool_types::{
        AttributeKind, AttributeRegistry, AttributeSpec, Genome, GenomeId, PopulationId,
    };

    use super::*;

    fn population(fitness: &[f64]) -> Population {
        let registry =
            AttributeRegistry::new(vec![AttributeSpec::new("fitness", AttributeKind::Float)])
                .unwrap();
        let genomes = fitness
            .iter()
            .map(|&f| Genome::new(GenomeId::new()).with_attribute("fitness", f))
            .collect();
        Population::new(PopulationId::new(), 3, 2, registry, genomes).unwrap()
    }

    fn store_with(entries: &[(&str, &Population)]) -> MemorySnapshotStore {
        let store = MemorySnapshotStore::new();
        for (name, pop) in entries {
            store
                .insert_population(SnapshotHandle::new(*name).unwrap(), pop)
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn starts_idle_and_empty() {
        let loader = GuardedLoader::new(MemorySnapshotStore::new());
        assert!(matches!(loader.state(), LoaderState::Idle));
        assert!(loader.current().is_none());
        assert!(loader.current_population().is_none());
        assert!(loader.current_stats().is_none());
        assert_eq!(loader.generation(), 0);
    }

    #[tokio::test]
    async fn successful_select_publishes_paired_values() {
        let pop = population(&[5.0, 5.0, 2.0]);
        let loader = GuardedLoader::new(store_with(&[("a.json", &pop)]));
        let handle = SnapshotHandle::new("a.json").unwrap();

        let outcome = loader.select(Some(&handle)).await.unwrap();
        let SelectOutcome::Loaded(selection) = outcome else {
            panic!("expected a published selection");
        };
        assert_eq!(selection.handle(), &handle);
        assert_eq!(selection.population().id(), pop.id());
        assert_eq!(selection.stats().population_id, pop.id());
        // Stats were installed on the published population.
        assert_eq!(selection.population().stats(), Some(selection.stats().as_ref()));

        assert!(matches!(loader.state(), LoaderState::Ready(_)));
        assert_eq!(loader.current_population().map(|p| p.id()), Some(pop.id()));
        assert_eq!(loader.current_stats().map(|s| s.population_id), Some(pop.id()));
        assert_eq!(loader.generation(), 1);
    }

    #[tokio::test]
    async fn unset_selection_is_silent() {
        let pop = population(&[1.0]);
        let loader = GuardedLoader::new(store_with(&[("a.json", &pop)]));
        loader
            .select(Some(&SnapshotHandle::new("a.json").unwrap()))
            .await
            .unwrap();
        let before = loader.current().unwrap();

        let outcome = loader.select(None).await.unwrap();
        assert!(matches!(outcome, SelectOutcome::Unavailable));
        assert!(Arc::ptr_eq(&loader.current().unwrap(), &before));
        assert!(matches!(
            loader.state(),
            LoaderState::Failed(LoadFailure::Unavailable { handle: None })
        ));
    }

    #[tokio::test]
    async fn clear_resets_to_idle() {
        let pop = population(&[1.0]);
        let loader = GuardedLoader::new(store_with(&[("a.json", &pop)]));
        loader
            .select(Some(&SnapshotHandle::new("a.json").unwrap()))
            .await
            .unwrap();
        loader.clear().await;
        assert!(loader.current().is_none());
        assert!(matches!(loader.state(), LoaderState::Idle));
        // Generation counts publications, not clears.
        assert_eq!(loader.generation(), 1);
    }
}
