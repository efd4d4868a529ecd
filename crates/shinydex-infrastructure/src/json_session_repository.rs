//! JSON-file session snapshot storage.
//!
//! Persists the whole session registry (session list + active pointer) as one
//! JSON document under a fixed storage name. Writes are atomic: the document
//! is written to a temporary sibling file and renamed into place, so a crash
//! mid-save never leaves a truncated snapshot behind.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use shinydex_core::session::{SessionStore, SessionStoreRepository};

use crate::paths::ShinydexPaths;

/// Fixed storage name for the session snapshot document.
pub const STORAGE_NAME: &str = "hunting-storage.json";

/// [`SessionStoreRepository`] backed by a single JSON file.
pub struct JsonSessionRepository {
    path: PathBuf,
}

impl JsonSessionRepository {
    /// Creates a repository at the default platform location
    /// (`<data dir>/shinydex/hunting-storage.json`).
    ///
    /// # Errors
    ///
    /// Returns an error when the platform data directory cannot be resolved.
    pub fn default_location() -> Result<Self> {
        let path = ShinydexPaths::session_storage_file()
            .context("resolving session storage location")?;
        Ok(Self::at_path(path))
    }

    /// Creates a repository at an explicit path (tests, portable installs).
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SessionStoreRepository for JsonSessionRepository {
    async fn load(&self) -> Result<Option<SessionStore>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading session snapshot at {:?}", self.path))?;
        let store: SessionStore = serde_json::from_str(&content)
            .with_context(|| format!("parsing session snapshot at {:?}", self.path))?;

        tracing::debug!(sessions = store.sessions().len(), "loaded session snapshot");
        Ok(Some(store))
    }

    async fn save(&self, store: &SessionStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating storage directory {parent:?}"))?;
        }

        let content = serde_json::to_string_pretty(store).context("serializing session snapshot")?;

        // Write-then-rename keeps the previous snapshot intact on failure.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("writing session snapshot at {tmp_path:?}"))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("replacing session snapshot at {:?}", self.path))?;

        tracing::debug!(sessions = store.sessions().len(), "saved session snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shinydex_core::session::{HuntConfig, HuntModifiers};

    fn config() -> HuntConfig {
        HuntConfig {
            pokemon_id: "eevee".to_string(),
            pokemon_name: "Eevee".to_string(),
            game_id: "Scarlet/Violet".to_string(),
            method_id: "Masuda".to_string(),
            has_charm: true,
            modifiers: HuntModifiers::default(),
            is_group_hunt: false,
            team_id: None,
        }
    }

    #[tokio::test]
    async fn load_without_snapshot_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let repository = JsonSessionRepository::at_path(dir.path().join(STORAGE_NAME));

        assert!(repository.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn snapshot_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let repository = JsonSessionRepository::at_path(dir.path().join(STORAGE_NAME));

        let mut store = SessionStore::new();
        store.start_session(config()).unwrap();
        store.increment_count();

        repository.save(&store).await.unwrap();
        let restored = repository.load().await.unwrap().unwrap();

        assert_eq!(restored, store);
    }

    #[tokio::test]
    async fn save_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let repository = JsonSessionRepository::at_path(dir.path().join(STORAGE_NAME));

        let mut store = SessionStore::new();
        store.start_session(config()).unwrap();
        repository.save(&store).await.unwrap();

        store.increment_count();
        repository.save(&store).await.unwrap();

        let restored = repository.load().await.unwrap().unwrap();
        assert_eq!(restored.active_session().unwrap().attempt_count, 1);
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_NAME);
        fs::write(&path, "{ not json").unwrap();
        let repository = JsonSessionRepository::at_path(path);

        assert!(repository.load().await.is_err());
    }
}
