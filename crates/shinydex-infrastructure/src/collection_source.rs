//! In-memory collection source.
//!
//! The production collection feed is the managed backend; this implementation
//! holds the two entry sets in memory and is refreshed wholesale whenever the
//! external cache-invalidation signal fires. It also serves as the test
//! double for anything consuming [`CollectionSource`].

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use shinydex_core::collection::{CollectionEntry, CollectionSource};

/// [`CollectionSource`] over in-memory entry sets.
#[derive(Default)]
pub struct StaticCollectionSource {
    personal: Mutex<Vec<CollectionEntry>>,
    team: Mutex<Vec<CollectionEntry>>,
}

impl StaticCollectionSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the personal entry set (cache refresh).
    pub fn set_personal(&self, entries: Vec<CollectionEntry>) {
        if let Ok(mut personal) = self.personal.lock() {
            *personal = entries;
        }
    }

    /// Replaces the team-wide entry set (cache refresh).
    pub fn set_team(&self, entries: Vec<CollectionEntry>) {
        if let Ok(mut team) = self.team.lock() {
            *team = entries;
        }
    }
}

#[async_trait]
impl CollectionSource for StaticCollectionSource {
    async fn personal_entries(&self, owner_id: &str) -> Result<Vec<CollectionEntry>> {
        let personal = self
            .personal
            .lock()
            .map_err(|_| anyhow::anyhow!("personal entries lock poisoned"))?;
        Ok(personal
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn team_entries(&self, _team_id: &str) -> Result<Vec<CollectionEntry>> {
        let team = self
            .team
            .lock()
            .map_err(|_| anyhow::anyhow!("team entries lock poisoned"))?;
        Ok(team.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, owner: &str) -> CollectionEntry {
        CollectionEntry {
            id: id.to_string(),
            pokemon_id: "eevee".to_string(),
            owner_id: owner.to_string(),
            attempt_count: 1,
            game_id: "Scarlet/Violet".to_string(),
            method_id: "Masuda".to_string(),
        }
    }

    #[tokio::test]
    async fn personal_entries_are_owner_scoped() {
        let source = StaticCollectionSource::new();
        source.set_personal(vec![entry("1", "me"), entry("2", "someone-else")]);

        let mine = source.personal_entries("me").await.unwrap();

        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "1");
    }

    #[tokio::test]
    async fn refresh_replaces_previous_entries() {
        let source = StaticCollectionSource::new();
        source.set_team(vec![entry("1", "me")]);
        source.set_team(vec![entry("2", "partner")]);

        let team = source.team_entries("team-1").await.unwrap();

        assert_eq!(team.len(), 1);
        assert_eq!(team[0].id, "2");
    }
}
