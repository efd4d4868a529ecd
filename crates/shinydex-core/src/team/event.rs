//! Team broadcast events.
//!
//! The three event kinds that travel over a team channel, in the exact wire
//! shape the broadcast backend carries (snake_case kinds, camelCase payload
//! fields).

use serde::{Deserialize, Serialize};

use crate::session::{HuntConfig, HuntModifiers, HuntSession};

/// Payload announcing a shared hunt to the rest of the team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAnnouncement {
    /// Catalog id of the hunted species
    pub pokemon_id: String,
    /// Display name of the hunted species
    pub pokemon_name: String,
    /// Game the hunt takes place in
    pub game_id: String,
    /// Hunting method in use
    pub method_id: String,
    /// Whether the announcing trainer holds a Shiny Charm
    pub has_charm: bool,
    /// Active hunt modifiers
    #[serde(default)]
    pub modifiers: HuntModifiers,
    /// Team the hunt is shared with
    pub team_id: String,
    /// Announcing trainer's user id
    pub trainer_id: String,
    /// Announcing trainer's display name
    pub trainer_name: String,
}

impl SessionAnnouncement {
    /// Builds the announcement for a freshly started group hunt.
    pub fn for_session(session: &HuntSession, trainer_id: &str, trainer_name: &str) -> Self {
        Self {
            pokemon_id: session.pokemon_id.clone(),
            pokemon_name: session.pokemon_name.clone(),
            game_id: session.game_id.clone(),
            method_id: session.method_id.clone(),
            has_charm: session.has_charm,
            modifiers: session.modifiers.clone(),
            team_id: session.team_id.clone().unwrap_or_default(),
            trainer_id: trainer_id.to_string(),
            trainer_name: trainer_name.to_string(),
        }
    }

    /// The local session configuration a recipient starts when accepting the
    /// invitation: the announced hunt, joined as a group hunt.
    pub fn to_config(&self) -> HuntConfig {
        HuntConfig {
            pokemon_id: self.pokemon_id.clone(),
            pokemon_name: self.pokemon_name.clone(),
            game_id: self.game_id.clone(),
            method_id: self.method_id.clone(),
            has_charm: self.has_charm,
            modifiers: self.modifiers.clone(),
            is_group_hunt: true,
            team_id: Some(self.team_id.clone()),
        }
    }
}

/// An event on a team broadcast channel.
///
/// Fire-and-forget: the engine assumes no acknowledgment or delivery
/// guarantee for any of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum TeamEvent {
    /// A teammate started a shared hunt
    SessionStarted(SessionAnnouncement),
    /// A teammate's attempt counter changed
    #[serde(rename_all = "camelCase")]
    CountIncremented { user_id: String, count: u32 },
    /// A teammate found their target
    #[serde(rename_all = "camelCase")]
    TargetFound {
        user_id: String,
        trainer_name: String,
        pokemon_name: String,
    },
}

impl TeamEvent {
    /// User id of the trainer the event originated from. Consumers drop
    /// events from themselves (self-echo suppression).
    pub fn sender_id(&self) -> &str {
        match self {
            Self::SessionStarted(announcement) => &announcement.trainer_id,
            Self::CountIncremented { user_id, .. } => user_id,
            Self::TargetFound { user_id, .. } => user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_event_matches_wire_shape() {
        let event = TeamEvent::CountIncremented {
            user_id: "user-1".to_string(),
            count: 42,
        };

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "event": "count_incremented",
                "payload": { "userId": "user-1", "count": 42 }
            })
        );
    }

    #[test]
    fn announcement_matches_wire_shape() {
        let event = TeamEvent::SessionStarted(SessionAnnouncement {
            pokemon_id: "eevee".to_string(),
            pokemon_name: "Eevee".to_string(),
            game_id: "Scarlet/Violet".to_string(),
            method_id: "Masuda".to_string(),
            has_charm: true,
            modifiers: HuntModifiers::default(),
            team_id: "team-1".to_string(),
            trainer_id: "user-1".to_string(),
            trainer_name: "Ash".to_string(),
        });

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "session_started");
        assert_eq!(json["payload"]["pokemonId"], "eevee");
        assert_eq!(json["payload"]["hasCharm"], true);
        assert_eq!(json["payload"]["trainerName"], "Ash");
    }

    #[test]
    fn accepted_announcement_becomes_a_group_hunt_config() {
        let announcement = SessionAnnouncement {
            pokemon_id: "eevee".to_string(),
            pokemon_name: "Eevee".to_string(),
            game_id: "Scarlet/Violet".to_string(),
            method_id: "Masuda".to_string(),
            has_charm: false,
            modifiers: HuntModifiers::default(),
            team_id: "team-1".to_string(),
            trainer_id: "user-1".to_string(),
            trainer_name: "Ash".to_string(),
        };

        let config = announcement.to_config();

        assert!(config.is_group_hunt);
        assert_eq!(config.team_id.as_deref(), Some("team-1"));
        assert_eq!(config.pokemon_id, "eevee");
    }
}
