//! Hunting use case implementation.
//!
//! This module provides the `HuntingUseCase` which orchestrates the session
//! store, snapshot persistence, the team broadcast channel and the collection
//! merger behind the operations the UI invokes.
//!
//! The model is local-first: every mutation lands in the in-memory store
//! synchronously and the UI reads from there; persistence and broadcast run
//! afterwards as non-gating side effects. A failed save is logged and
//! swallowed, never surfaced as an operation failure.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use serde::Serialize;
use shinydex_core::collection::{CollectionMerger, CollectionSource, MergedView};
use shinydex_core::error::ShinydexError;
use shinydex_core::probability::{
    ProbabilityTable, cumulative_probability, current_rate, luck_factor,
};
use shinydex_core::session::{HuntConfig, HuntSession, SessionStore, SessionStoreRepository};
use shinydex_core::team::SessionAnnouncement;
use shinydex_infrastructure::TrainerProfile;
use shinydex_realtime::RealtimeBridge;

/// Which collection the capture view reflects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DexMode {
    /// Only the trainer's own entries
    Personal,
    /// Personal and team-wide entries, reconciled
    Team,
}

/// Derived odds for the active hunt, recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HuntOdds {
    /// Denominator of the current 1-in-N encounter rate
    pub rate: u32,
    /// Chance (percent) the target would have appeared by now
    pub cumulative_probability: f64,
    /// Attempts made relative to the expected rate
    pub luck_factor: f64,
    /// Combined attempt count (own + partners) the odds are based on
    pub total_count: u64,
}

/// Use case coordinating all hunting-session operations.
///
/// Owns the [`SessionStore`] and exposes it as a shared handle so the
/// realtime router can apply inbound partner updates to the same state the
/// UI reads.
pub struct HuntingUseCase {
    /// Local trainer identity, for broadcast attribution
    trainer: TrainerProfile,
    /// Team the trainer belongs to, if any
    team_id: Option<String>,
    /// The in-memory session registry (single source of truth for the UI)
    store: Arc<Mutex<SessionStore>>,
    /// Snapshot persistence backend
    repository: Arc<dyn SessionStoreRepository>,
    /// Team broadcast channel
    bridge: Arc<dyn RealtimeBridge>,
    /// Read-only collection feed
    collection_source: Arc<dyn CollectionSource>,
    /// Catalog/roster-aware merger for the capture view
    merger: CollectionMerger,
    /// Rate table for odds derivation
    table: ProbabilityTable,
}

impl HuntingUseCase {
    /// Creates a new `HuntingUseCase` instance.
    ///
    /// # Arguments
    ///
    /// * `trainer` - Local trainer identity
    /// * `team_id` - Team the trainer belongs to, if any
    /// * `table` - Probability table (built-in or config override)
    /// * `merger` - Collection merger over the catalog and team roster
    /// * `repository` - Snapshot persistence backend
    /// * `bridge` - Team broadcast channel
    /// * `collection_source` - Read-only collection feed
    pub fn new(
        trainer: TrainerProfile,
        team_id: Option<String>,
        table: ProbabilityTable,
        merger: CollectionMerger,
        repository: Arc<dyn SessionStoreRepository>,
        bridge: Arc<dyn RealtimeBridge>,
        collection_source: Arc<dyn CollectionSource>,
    ) -> Self {
        Self {
            trainer,
            team_id,
            store: Arc::new(Mutex::new(SessionStore::new())),
            repository,
            bridge,
            collection_source,
            merger,
            table,
        }
    }

    /// Shared handle to the session store, for attaching the realtime router.
    pub fn store_handle(&self) -> Arc<Mutex<SessionStore>> {
        Arc::clone(&self.store)
    }

    /// Restores the persisted session snapshot on startup.
    ///
    /// # Errors
    ///
    /// Returns an error when a snapshot exists but cannot be read or parsed.
    pub async fn restore(&self) -> Result<()> {
        if let Some(snapshot) = self.repository.load().await? {
            tracing::info!(sessions = snapshot.sessions().len(), "restored hunts");
            *self.lock_store() = snapshot;
        }
        Ok(())
    }

    /// Starts a new hunt and makes it the active session.
    ///
    /// A group hunt is announced to the team; a group configuration without a
    /// team to share with is demoted to a solo hunt.
    ///
    /// # Errors
    ///
    /// Returns [`ShinydexError::SessionLimitReached`] at the concurrent-hunt
    /// cap. This is the only failure the operation surfaces.
    pub async fn start_hunt(
        &self,
        mut config: HuntConfig,
    ) -> std::result::Result<HuntSession, ShinydexError> {
        if config.team_id.is_none() {
            config.team_id = self.team_id.clone();
        }
        if config.team_id.is_none() {
            config.is_group_hunt = false;
        }

        let session = {
            let mut store = self.lock_store();
            store.start_session(config)?.clone()
        };
        tracing::info!(target = %session.pokemon_name, "hunt started");

        if session.is_group_hunt
            && let Some(team_id) = &session.team_id
        {
            let announcement = SessionAnnouncement::for_session(
                &session,
                &self.trainer.user_id,
                &self.trainer.username,
            );
            self.bridge.publish_session_started(team_id, announcement);
        }

        self.persist().await;
        Ok(session)
    }

    /// Starts a local session mirroring a teammate's announced hunt.
    pub async fn join_hunt(
        &self,
        announcement: &SessionAnnouncement,
    ) -> std::result::Result<HuntSession, ShinydexError> {
        self.start_hunt(announcement.to_config()).await
    }

    /// Records one attempt on the active hunt. No-op without one.
    pub async fn record_attempt(&self) {
        let broadcast = {
            let mut store = self.lock_store();
            store.increment_count();
            store.active_session().and_then(|session| {
                session
                    .is_group_hunt
                    .then(|| session.team_id.clone().map(|t| (t, session.attempt_count)))
                    .flatten()
            })
        };

        if let Some((team_id, count)) = broadcast {
            self.bridge
                .publish_increment(&team_id, &self.trainer.user_id, count);
        }

        self.persist().await;
    }

    /// Removes one attempt from the active hunt, flooring at zero.
    pub async fn undo_attempt(&self) {
        self.lock_store().decrement_count();
        self.persist().await;
    }

    /// Switches the on-screen session.
    pub async fn switch_session(&self, id: &str) {
        self.lock_store().set_active_session(id);
        self.persist().await;
    }

    /// Stops a hunt (the active one when `id` is `None`).
    pub async fn stop_hunt(&self, id: Option<&str>) -> Option<HuntSession> {
        let removed = self.lock_store().stop_session(id);
        if removed.is_some() {
            self.persist().await;
        }
        removed
    }

    /// Confirms the active hunt's target was found: announces the discovery
    /// to the team and removes the session.
    pub async fn confirm_found(&self) -> Option<HuntSession> {
        let removed = self.lock_store().stop_session(None)?;
        tracing::info!(target = %removed.pokemon_name, attempts = removed.attempt_count, "target found");

        if removed.is_group_hunt
            && let Some(team_id) = &removed.team_id
        {
            self.bridge.publish_found(
                team_id,
                &self.trainer.user_id,
                &self.trainer.username,
                &removed.pokemon_name,
            );
        }

        self.persist().await;
        Some(removed)
    }

    /// The session currently on screen, if any.
    pub fn active_session(&self) -> Option<HuntSession> {
        self.lock_store().active_session().cloned()
    }

    /// All running hunts, in creation order.
    pub fn sessions(&self) -> Vec<HuntSession> {
        self.lock_store().sessions().to_vec()
    }

    /// Derived odds for the active hunt.
    ///
    /// The encounter rate follows the trainer's own streak; the cumulative
    /// probability and luck factor run over the combined team total.
    pub fn active_odds(&self) -> Option<HuntOdds> {
        let store = self.lock_store();
        let session = store.active_session()?;
        let rate = current_rate(&self.table, session);
        let total = session.total_count();
        let attempts = u32::try_from(total).unwrap_or(u32::MAX);

        Some(HuntOdds {
            rate,
            cumulative_probability: cumulative_probability(rate, attempts),
            luck_factor: luck_factor(rate, attempts),
            total_count: total,
        })
    }

    /// The capture view for the requested dex mode, recomputed from the
    /// current collection feeds.
    pub async fn collection_view(&self, mode: DexMode) -> Result<Vec<MergedView>> {
        let personal = self
            .collection_source
            .personal_entries(&self.trainer.user_id)
            .await?;

        match (mode, &self.team_id) {
            (DexMode::Team, Some(team_id)) => {
                let team = self.collection_source.team_entries(team_id).await?;
                Ok(self.merger.merged_view(&personal, &team))
            }
            _ => Ok(self.merger.personal_view(&personal)),
        }
    }

    /// Persists the current snapshot. Local-first: failures are logged, not
    /// surfaced, so a storage hiccup never blocks the hunt.
    async fn persist(&self) {
        let snapshot = self.lock_store().clone();
        if let Err(error) = self.repository.save(&snapshot).await {
            tracing::warn!(%error, "failed to persist session snapshot");
        }
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, SessionStore> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
