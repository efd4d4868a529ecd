//! Collection source trait.
//!
//! The engine has no write path into the collection store; writes happen
//! through the external CRUD collaborator and merely trigger a recompute of
//! the merged view. This trait is the read-only seam.

use anyhow::Result;
use async_trait::async_trait;

use super::entry::CollectionEntry;

/// Read-only feed of collection entries from the backing store.
///
/// Both reads are eventually consistent with each other; the merger is
/// responsible for reconciling the lag, not the source.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// The trainer's own entries.
    async fn personal_entries(&self, owner_id: &str) -> Result<Vec<CollectionEntry>>;

    /// The team-wide entries, across all members.
    async fn team_entries(&self, team_id: &str) -> Result<Vec<CollectionEntry>>;
}
