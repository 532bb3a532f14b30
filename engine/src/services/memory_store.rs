//! In-memory store implementation
//!
//! Holds the snapshot in process memory. Used by tests and by callers that
//! manage persistence themselves.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::{EngineError, EngineResult};
use crate::traits::StoreGateway;
use shared::Snapshot;

#[derive(Default)]
pub struct InMemoryStore {
    slot: Mutex<Option<Snapshot>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store already holding `snapshot`
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot)),
        }
    }

    /// Copy of whatever was last saved
    pub fn stored(&self) -> Option<Snapshot> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn with_slot<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Option<Snapshot>) -> T,
    ) -> EngineResult<T> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| EngineError::gateway(operation, "in-memory store lock poisoned"))?;
        Ok(f(&mut slot))
    }
}

#[async_trait]
impl StoreGateway for InMemoryStore {
    async fn load(&self) -> EngineResult<Option<Snapshot>> {
        self.with_slot("load", |slot| slot.clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> EngineResult<()> {
        self.with_slot("save", |slot| *slot = Some(snapshot.clone()))
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}
