//! Session store persistence trait.
//!
//! Defines the interface for round-tripping the session snapshot through an
//! external key-value persistence layer.

use anyhow::Result;
use async_trait::async_trait;

use super::store::SessionStore;

/// An abstract repository for persisting the session registry.
///
/// The persisted format is exactly the [`SessionStore`] shape (session list
/// plus active pointer), serialized as plain structured data under a fixed
/// storage name. Implementations decide where that document lives (a JSON
/// file, browser storage, a remote key-value store).
///
/// Persistence is a downstream side effect of local mutation: callers must
/// never let a failed save gate an in-memory state change.
#[async_trait]
pub trait SessionStoreRepository: Send + Sync {
    /// Loads the last persisted snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(store))`: a snapshot was found and parsed
    /// - `Ok(None)`: nothing persisted yet
    /// - `Err(_)`: storage access or parse failure
    async fn load(&self) -> Result<Option<SessionStore>>;

    /// Persists the current snapshot, replacing any previous one.
    async fn save(&self, store: &SessionStore) -> Result<()>;
}
