//! In-memory session registry.
//!
//! `SessionStore` is the only stateful, mutable part of the engine. It owns
//! every concurrent hunt plus the single active-session pointer, and it is the
//! local source of truth for the UI: persistence and broadcast are downstream
//! side effects layered on top by the application layer.

use serde::{Deserialize, Serialize};

use super::model::{HuntConfig, HuntSession};
use crate::error::{Result, ShinydexError};

/// Maximum number of concurrent hunts per trainer.
pub const MAX_SESSIONS: usize = 10;

/// Registry of concurrent hunt sessions with one active pointer.
///
/// Sessions are kept in creation order. The invariant maintained by every
/// operation: `active_session_id`, when set, references a session present in
/// the collection (and is `None` only when the collection is empty).
///
/// The struct serializes as-is; that shape is the persisted snapshot the
/// storage layer round-trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStore {
    /// All running hunts, in creation order
    sessions: Vec<HuntSession>,
    /// Id of the session currently shown on screen
    active_session_id: Option<String>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new hunt and makes it the active session.
    ///
    /// # Errors
    ///
    /// Returns [`ShinydexError::SessionLimitReached`] when [`MAX_SESSIONS`]
    /// hunts are already running; the store is left unchanged. This is the
    /// only operation on the store that can fail.
    pub fn start_session(&mut self, config: HuntConfig) -> Result<&HuntSession> {
        if self.sessions.len() >= MAX_SESSIONS {
            return Err(ShinydexError::session_limit(MAX_SESSIONS));
        }

        let index = self.sessions.len();
        let session = HuntSession::new(config);
        self.active_session_id = Some(session.id.clone());
        self.sessions.push(session);
        Ok(&self.sessions[index])
    }

    /// Adds one attempt to the active session. No-op without an active session.
    pub fn increment_count(&mut self) {
        if let Some(session) = self.active_session_mut() {
            session.attempt_count += 1;
        }
    }

    /// Removes one attempt from the active session, flooring at 0. No-op
    /// without an active session.
    pub fn decrement_count(&mut self) {
        if let Some(session) = self.active_session_mut() {
            session.attempt_count = session.attempt_count.saturating_sub(1);
        }
    }

    /// Repoints the active-session marker.
    ///
    /// The id is not validated against the collection; callers are expected to
    /// pass an id they obtained from this store.
    pub fn set_active_session(&mut self, id: impl Into<String>) {
        self.active_session_id = Some(id.into());
    }

    /// Stops a hunt, removing it from the store.
    ///
    /// Defaults to the active session when `id` is `None`. When the removed
    /// session was the active one, the first remaining session (in creation
    /// order) becomes active, or the pointer clears if none remain. Returns
    /// the removed session, or `None` when nothing matched.
    pub fn stop_session(&mut self, id: Option<&str>) -> Option<HuntSession> {
        let target_id = match id.or(self.active_session_id.as_deref()) {
            Some(id) => id.to_string(),
            None => return None,
        };

        let index = self.sessions.iter().position(|s| s.id == target_id)?;
        let removed = self.sessions.remove(index);

        if self.active_session_id.as_deref() == Some(target_id.as_str()) {
            self.active_session_id = self.sessions.first().map(|s| s.id.clone());
        }

        Some(removed)
    }

    /// Records a teammate's reported attempt count on a session.
    ///
    /// Last write wins per partner key; the value replaces any prior report
    /// rather than accumulating. Returns `false` (silently, per the stale
    /// delivery rule) when the session no longer exists.
    pub fn apply_partner_update(
        &mut self,
        session_id: &str,
        partner_id: impl Into<String>,
        count: u32,
    ) -> bool {
        match self.sessions.iter_mut().find(|s| s.id == session_id) {
            Some(session) => {
                session.partner_counts.insert(partner_id.into(), count);
                true
            }
            None => false,
        }
    }

    /// Returns the session the active pointer references, if any.
    pub fn active_session(&self) -> Option<&HuntSession> {
        let id = self.active_session_id.as_deref()?;
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Id of the active session, if any.
    pub fn active_session_id(&self) -> Option<&str> {
        self.active_session_id.as_deref()
    }

    /// All running hunts, in creation order.
    pub fn sessions(&self) -> &[HuntSession] {
        &self.sessions
    }

    /// Looks up a session by id.
    pub fn session(&self, id: &str) -> Option<&HuntSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// The group session associated with a team, preferring the active one.
    ///
    /// Inbound partner updates carry only a team scope, so the router uses
    /// this to find its mutation target.
    pub fn group_session_for_team(&self, team_id: &str) -> Option<&HuntSession> {
        self.active_session()
            .filter(|s| s.is_group_hunt && s.team_id.as_deref() == Some(team_id))
            .or_else(|| {
                self.sessions
                    .iter()
                    .find(|s| s.is_group_hunt && s.team_id.as_deref() == Some(team_id))
            })
    }

    fn active_session_mut(&mut self) -> Option<&mut HuntSession> {
        let id = self.active_session_id.clone()?;
        self.sessions.iter_mut().find(|s| s.id == id)
    }
}
