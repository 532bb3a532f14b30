//! Test helpers and builder patterns for engine tests
//!
//! Reduce boilerplate when opening engines over mocked or in-memory gateways.

use engine::*;
use shared::{Conflict, EntityRecord, Lesson, NewLesson, Snapshot};

use super::fixtures::TestFixtures;

/// Builder for engines over a mocked gateway with sensible defaults
pub struct EngineBuilder {
    gateway: MockStoreGateway,
    config: EngineConfig,
}

impl EngineBuilder {
    /// Gateway that loads `snapshot` and accepts every save
    pub fn new(snapshot: Snapshot) -> Self {
        let mut gateway = MockStoreGateway::new();

        gateway
            .expect_load()
            .returning(move || Ok(Some(snapshot.clone())))
            .times(0..);
        gateway
            .expect_describe()
            .returning(|| "mock gateway".to_string())
            .times(0..);

        Self {
            gateway,
            config: EngineConfig::default(),
        }
    }

    /// Configure the gateway mock with a setup function
    pub fn with_gateway<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockStoreGateway),
    {
        setup(&mut self.gateway);
        self
    }

    pub fn strict(mut self) -> Self {
        self.config = EngineConfig::strict();
        self
    }

    pub async fn open(self) -> TestEngine {
        TimetableEngine::open(self.gateway, self.config)
            .await
            .expect("engine should open")
    }
}

/// Engine over mocks
pub type TestEngine = TimetableEngine<MockStoreGateway>;

/// Helper functions for common test operations
pub struct TestHelpers;

impl TestHelpers {
    /// Engine over an in-memory gateway already holding `snapshot`
    pub async fn memory_engine(snapshot: Snapshot) -> TimetableEngine<InMemoryStore> {
        TimetableEngine::open(InMemoryStore::with_snapshot(snapshot), EngineConfig::default())
            .await
            .expect("engine should open")
    }

    /// Engine over the small test school
    pub async fn small_school_engine() -> TimetableEngine<InMemoryStore> {
        Self::memory_engine(TestFixtures::small_school()).await
    }

    /// Create a lesson and return the stored record
    pub async fn create_lesson<G: StoreGateway>(
        engine: &TimetableEngine<G>,
        draft: NewLesson,
    ) -> Lesson {
        match engine.commit(Lesson::create_mutation(draft)).await {
            Ok(Outcome::Created(EntityRecord::Lesson(lesson))) => lesson,
            other => panic!("unexpected create outcome: {other:?}"),
        }
    }

    /// Raw lesson ids of a conflict, in stored order
    pub fn conflict_lessons(conflict: &Conflict) -> Vec<u32> {
        conflict.lessons.iter().map(|lesson| lesson.id.into()).collect()
    }
}
