//! Timetable engine facade
//!
//! Owns the current entity store and the gateway it is persisted through, and
//! serializes writers: a mutation is checked, applied, saved and only then
//! becomes visible to readers. A failed save leaves the previous store in place.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use shared::{
    ClassId, Conflict, LessonId, Period, ProcessId, Snapshot, SnapshotSummary, TeacherId, Weekday,
    process_debug, process_error, process_info, process_warn,
};

use crate::core::pipeline::{self, Mutation, Outcome, Transition};
use crate::core::placement::{self, Placement, PlacementPolicy, Verdict};
use crate::core::{EntityStore, WeeklyGrid, grid, seed};
use crate::error::EngineResult;
use crate::traits::StoreGateway;

/// Engine settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub placement_policy: PlacementPolicy,
}

impl EngineConfig {
    pub fn strict() -> Self {
        Self {
            placement_policy: PlacementPolicy::Strict,
        }
    }
}

/// The school timetable with its persistence
pub struct TimetableEngine<G>
where
    G: StoreGateway,
{
    gateway: G,
    config: EngineConfig,
    store: RwLock<EntityStore>,
    mutations: AtomicU64,
}

impl<G> TimetableEngine<G>
where
    G: StoreGateway,
{
    /// Load the stored school, seeding and saving the default school when the
    /// gateway holds nothing yet
    pub async fn open(gateway: G, config: EngineConfig) -> EngineResult<Self> {
        let store = load_or_seed(&gateway).await?;

        process_info!(
            ProcessId::current(),
            "📚 Timetable opened from {} ({}, {:?} placement)",
            gateway.describe(),
            store.summary(),
            config.placement_policy
        );

        Ok(Self {
            gateway,
            config,
            store: RwLock::new(store),
            mutations: AtomicU64::new(0),
        })
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Number of mutations committed since the engine was opened
    pub fn mutation_count(&self) -> u64 {
        self.mutations.load(Ordering::Relaxed)
    }

    /// Copy of the current snapshot, conflicts included
    pub async fn snapshot(&self) -> Snapshot {
        self.store.read().await.snapshot().clone()
    }

    /// Run `f` against the current store under the read lock
    pub async fn read<T>(&self, f: impl FnOnce(&EntityStore) -> T) -> T {
        let store = self.store.read().await;
        f(&*store)
    }

    pub async fn summary(&self) -> SnapshotSummary {
        self.read(EntityStore::summary).await
    }

    pub async fn conflicts(&self) -> Vec<Conflict> {
        self.read(|store| store.conflicts().to_vec()).await
    }

    pub async fn class_grid(&self, id: ClassId) -> EngineResult<WeeklyGrid> {
        self.read(|store| grid::class_grid(store, id)).await
    }

    pub async fn teacher_grid(&self, id: TeacherId) -> EngineResult<WeeklyGrid> {
        self.read(|store| grid::teacher_grid(store, id)).await
    }

    /// Apply one mutation and persist the result.
    ///
    /// Under the strict placement policy, lesson placements failing validation
    /// are refused with `ValidationRejected` before anything changes.
    pub async fn commit(&self, mutation: Mutation) -> EngineResult<Outcome> {
        let mut store = self.store.write().await;
        let label = mutation.label();

        if let Err(e) = self.config.placement_policy.check(&store, &mutation) {
            process_warn!(ProcessId::current(), "🚫 Refused {}: {}", label, e);
            return Err(e);
        }

        let Transition { store: next, output } = pipeline::apply(&store, mutation)?;

        if let Err(e) = self.gateway.save(next.snapshot()).await {
            process_error!(ProcessId::current(), "❌ Could not persist {}: {}", label, e);
            return Err(e);
        }

        *store = next;
        self.mutations.fetch_add(1, Ordering::Relaxed);

        process_info!(ProcessId::current(), "✏️ Committed {} ({})", label, store.summary());
        Ok(output)
    }

    /// Advisory check of a candidate placement against the current lessons
    pub async fn validate(&self, candidate: &Placement) -> Verdict {
        self.read(|store| placement::validate(candidate, store.lessons(), store.teachers()).into())
            .await
    }

    /// Advisory check of moving an existing lesson
    pub async fn validate_move(
        &self,
        id: LessonId,
        weekday: Weekday,
        period: Period,
    ) -> EngineResult<Verdict> {
        self.read(|store| placement::validate_move(store, id, weekday, period))
            .await
    }

    /// Replace the in-memory school with whatever the gateway holds now
    pub async fn reload(&self) -> EngineResult<SnapshotSummary> {
        let mut store = self.store.write().await;
        let next = load_or_seed(&self.gateway).await?;
        let summary = next.summary();
        *store = next;

        process_debug!(
            ProcessId::current(),
            "🔄 Reloaded from {} ({})",
            self.gateway.describe(),
            summary
        );
        Ok(summary)
    }

    /// Overwrite the stored school with the default one.
    ///
    /// The default school replaces the stored document in a single save, so a
    /// failed save leaves both the document and the in-memory store untouched.
    pub async fn reset(&self) -> EngineResult<SnapshotSummary> {
        let mut store = self.store.write().await;
        let next = seed::default_school()?;

        if let Err(e) = self.gateway.save(next.snapshot()).await {
            process_error!(ProcessId::current(), "❌ Could not persist reset: {}", e);
            return Err(e);
        }

        let summary = next.summary();
        *store = next;
        self.mutations.fetch_add(1, Ordering::Relaxed);

        process_warn!(ProcessId::current(), "🧹 Timetable reset to defaults ({})", summary);
        Ok(summary)
    }
}

/// Stored school as a full replacement, or the default school when nothing is stored
async fn load_or_seed<G: StoreGateway>(gateway: &G) -> EngineResult<EntityStore> {
    match gateway.load().await? {
        Some(snapshot) => Ok(pipeline::replace(snapshot)?.store),
        None => {
            let store = seed::default_school()?;
            gateway.save(store.snapshot()).await?;
            process_info!(
                ProcessId::current(),
                "🌱 Seeded default school into {}",
                gateway.describe()
            );
            Ok(store)
        }
    }
}
