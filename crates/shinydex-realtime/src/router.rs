//! Inbound event routing.
//!
//! Turns events received on a team channel into session-store mutations and
//! UI surfacings. All handling is synchronous; anomalies (stale sessions,
//! events from the local trainer) are dropped silently per the engine's
//! error-handling policy.

use std::sync::{Arc, Mutex};

use shinydex_core::session::SessionStore;
use shinydex_core::team::{SessionAnnouncement, TeamEvent};

use crate::bus::{EventHandler, RealtimeBridge, Subscription};

/// Notification that a teammate found their target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShinyNotification {
    /// Finder's display name
    pub trainer_name: String,
    /// Found species display name
    pub pokemon_name: String,
}

/// Callback surfacing an invitation to join a teammate's hunt.
pub type InvitationHandler = Arc<dyn Fn(SessionAnnouncement) + Send + Sync>;

/// Callback surfacing a teammate's discovery.
pub type FoundHandler = Arc<dyn Fn(ShinyNotification) + Send + Sync>;

/// Routes inbound team events into the local session store.
///
/// Per event kind, for events originating from another trainer:
/// - `count_incremented` updates the partner count on the team's group
///   session (last write wins); dropped when no such session exists.
/// - `session_started` surfaces an invitation, but only while the local
///   trainer has no active session.
/// - `target_found` surfaces a notification.
///
/// Events from the local trainer are ignored: the transport echoes
/// broadcasts back, and the local mutation was already applied.
pub struct TeamEventRouter {
    user_id: String,
    team_id: String,
    store: Arc<Mutex<SessionStore>>,
    on_invitation: Option<InvitationHandler>,
    on_found: Option<FoundHandler>,
}

impl TeamEventRouter {
    /// Creates a router for one trainer on one team channel.
    pub fn new(
        user_id: impl Into<String>,
        team_id: impl Into<String>,
        store: Arc<Mutex<SessionStore>>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            team_id: team_id.into(),
            store,
            on_invitation: None,
            on_found: None,
        }
    }

    /// Installs the invitation surfacing callback.
    pub fn with_invitation_handler(mut self, handler: InvitationHandler) -> Self {
        self.on_invitation = Some(handler);
        self
    }

    /// Installs the discovery notification callback.
    pub fn with_found_handler(mut self, handler: FoundHandler) -> Self {
        self.on_found = Some(handler);
        self
    }

    /// Subscribes this router to its team's channel on a bridge.
    pub fn attach(self: Arc<Self>, bridge: &dyn RealtimeBridge) -> Subscription {
        let team_id = self.team_id.clone();
        let router = Arc::clone(&self);
        let handler: EventHandler = Arc::new(move |event| router.handle(event));
        bridge.subscribe(&team_id, handler)
    }

    /// Handles one inbound event.
    pub fn handle(&self, event: &TeamEvent) {
        if event.sender_id() == self.user_id {
            return;
        }

        match event {
            TeamEvent::CountIncremented { user_id, count } => {
                let Ok(mut store) = self.store.lock() else {
                    return;
                };
                let target = store
                    .group_session_for_team(&self.team_id)
                    .map(|session| session.id.clone());
                match target {
                    Some(session_id) => {
                        store.apply_partner_update(&session_id, user_id.clone(), *count);
                    }
                    // Stale delivery: the group hunt ended locally.
                    None => tracing::debug!(%user_id, "dropping increment with no group session"),
                }
            }
            TeamEvent::SessionStarted(announcement) => {
                let has_active = match self.store.lock() {
                    Ok(store) => store.active_session().is_some(),
                    Err(_) => return,
                };
                if has_active {
                    return;
                }
                if let Some(on_invitation) = &self.on_invitation {
                    on_invitation(announcement.clone());
                }
            }
            TeamEvent::TargetFound {
                trainer_name,
                pokemon_name,
                ..
            } => {
                if let Some(on_found) = &self.on_found {
                    on_found(ShinyNotification {
                        trainer_name: trainer_name.clone(),
                        pokemon_name: pokemon_name.clone(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shinydex_core::session::{HuntConfig, HuntModifiers};

    fn group_config(team_id: &str) -> HuntConfig {
        HuntConfig {
            pokemon_id: "eevee".to_string(),
            pokemon_name: "Eevee".to_string(),
            game_id: "Scarlet/Violet".to_string(),
            method_id: "Masuda".to_string(),
            has_charm: false,
            modifiers: HuntModifiers::default(),
            is_group_hunt: true,
            team_id: Some(team_id.to_string()),
        }
    }

    fn announcement(trainer_id: &str) -> SessionAnnouncement {
        SessionAnnouncement {
            pokemon_id: "eevee".to_string(),
            pokemon_name: "Eevee".to_string(),
            game_id: "Scarlet/Violet".to_string(),
            method_id: "Masuda".to_string(),
            has_charm: false,
            modifiers: HuntModifiers::default(),
            team_id: "team-1".to_string(),
            trainer_id: trainer_id.to_string(),
            trainer_name: "Misty".to_string(),
        }
    }

    #[test]
    fn partner_increment_updates_the_group_session() {
        let store = Arc::new(Mutex::new(SessionStore::new()));
        let session_id = store
            .lock()
            .unwrap()
            .start_session(group_config("team-1"))
            .unwrap()
            .id
            .clone();
        let router = TeamEventRouter::new("me", "team-1", Arc::clone(&store));

        router.handle(&TeamEvent::CountIncremented {
            user_id: "partner".to_string(),
            count: 12,
        });

        let store = store.lock().unwrap();
        let session = store.session(&session_id).unwrap();
        assert_eq!(session.partner_counts.get("partner"), Some(&12));
    }

    #[test]
    fn own_echo_is_suppressed() {
        let store = Arc::new(Mutex::new(SessionStore::new()));
        store
            .lock()
            .unwrap()
            .start_session(group_config("team-1"))
            .unwrap();
        let router = TeamEventRouter::new("me", "team-1", Arc::clone(&store));

        router.handle(&TeamEvent::CountIncremented {
            user_id: "me".to_string(),
            count: 99,
        });

        let store = store.lock().unwrap();
        assert!(store.active_session().unwrap().partner_counts.is_empty());
    }

    #[test]
    fn stale_increment_is_dropped_silently() {
        let store = Arc::new(Mutex::new(SessionStore::new()));
        let router = TeamEventRouter::new("me", "team-1", Arc::clone(&store));

        // No session exists for the team; nothing should happen.
        router.handle(&TeamEvent::CountIncremented {
            user_id: "partner".to_string(),
            count: 12,
        });

        assert!(store.lock().unwrap().sessions().is_empty());
    }

    #[test]
    fn session_started_surfaces_invitation_when_idle() {
        let store = Arc::new(Mutex::new(SessionStore::new()));
        let invitations = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&invitations);
        let router = TeamEventRouter::new("me", "team-1", store).with_invitation_handler(
            Arc::new(move |announcement| sink.lock().unwrap().push(announcement)),
        );

        router.handle(&TeamEvent::SessionStarted(announcement("partner")));

        let invitations = invitations.lock().unwrap();
        assert_eq!(invitations.len(), 1);
        assert_eq!(invitations[0].trainer_name, "Misty");
    }

    #[test]
    fn session_started_is_ignored_while_hunting() {
        let store = Arc::new(Mutex::new(SessionStore::new()));
        store
            .lock()
            .unwrap()
            .start_session(group_config("team-1"))
            .unwrap();
        let invitations = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&invitations);
        let router = TeamEventRouter::new("me", "team-1", store).with_invitation_handler(
            Arc::new(move |announcement| sink.lock().unwrap().push(announcement)),
        );

        router.handle(&TeamEvent::SessionStarted(announcement("partner")));

        assert!(invitations.lock().unwrap().is_empty());
    }

    #[test]
    fn target_found_surfaces_notification() {
        let store = Arc::new(Mutex::new(SessionStore::new()));
        let notifications = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&notifications);
        let router = TeamEventRouter::new("me", "team-1", store)
            .with_found_handler(Arc::new(move |n| sink.lock().unwrap().push(n)));

        router.handle(&TeamEvent::TargetFound {
            user_id: "partner".to_string(),
            trainer_name: "Misty".to_string(),
            pokemon_name: "Eevee".to_string(),
        });

        assert_eq!(notifications.lock().unwrap().as_slice(), &[
            ShinyNotification {
                trainer_name: "Misty".to_string(),
                pokemon_name: "Eevee".to_string(),
            }
        ]);
    }

    #[test]
    fn attached_router_receives_bus_events() {
        let bus = crate::bus::InMemoryBus::new();
        let store = Arc::new(Mutex::new(SessionStore::new()));
        let session_id = store
            .lock()
            .unwrap()
            .start_session(group_config("team-1"))
            .unwrap()
            .id
            .clone();
        let router = Arc::new(TeamEventRouter::new("me", "team-1", Arc::clone(&store)));
        let subscription = router.attach(&bus);

        bus.publish_increment("team-1", "partner", 4);

        {
            let store = store.lock().unwrap();
            let session = store.session(&session_id).unwrap();
            assert_eq!(session.partner_counts.get("partner"), Some(&4));
        }

        subscription.unsubscribe();
        bus.publish_increment("team-1", "partner", 9);

        let store = store.lock().unwrap();
        let session = store.session(&session_id).unwrap();
        assert_eq!(session.partner_counts.get("partner"), Some(&4));
    }
}
