//! Trait definitions with mockall annotations for testing
//!
//! The engine never touches storage directly; every load and save goes through
//! a `StoreGateway` so the backing medium can be swapped or mocked.

use shared::Snapshot;

use crate::error::EngineResult;

/// Loads and saves the whole school snapshot.
///
/// Implementations report failures as `EngineError::GatewayFailure`, or
/// `EngineError::MalformedSnapshot` when a stored document cannot be parsed.
#[mockall::automock]
#[async_trait::async_trait]
pub trait StoreGateway: Send + Sync {
    /// Read the stored snapshot
    ///
    /// # Returns
    /// `None` when nothing has been stored yet
    async fn load(&self) -> EngineResult<Option<Snapshot>>;

    /// Replace the stored snapshot with `snapshot`
    async fn save(&self, snapshot: &Snapshot) -> EngineResult<()>;

    /// Human-readable location of the store, for logs
    fn describe(&self) -> String;
}
