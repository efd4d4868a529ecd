//! Hunt session domain model.
//!
//! This module contains the core `HuntSession` entity plus the typed modifier
//! record that feeds the probability model. The session shape doubles as the
//! persisted and broadcast representation (camelCase on the wire), so it is
//! independent of any storage backend.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Sandwich power tier for boosted-item hunts.
///
/// The wire value is the raw level number; anything that is not the maximum
/// tier normalizes to [`SandwichLevel::Inactive`] on ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum SandwichLevel {
    /// No sparkling-power sandwich active (level 0)
    #[default]
    Inactive,
    /// Sparkling Power Lv. 3 active
    MaxPower,
}

impl From<u8> for SandwichLevel {
    fn from(level: u8) -> Self {
        if level >= 3 {
            SandwichLevel::MaxPower
        } else {
            SandwichLevel::Inactive
        }
    }
}

impl From<SandwichLevel> for u8 {
    fn from(level: SandwichLevel) -> Self {
        match level {
            SandwichLevel::Inactive => 0,
            SandwichLevel::MaxPower => 3,
        }
    }
}

/// Research completion tier for research-based hunts.
///
/// Unrecognized wire values normalize to the weakest tier, [`ResearchLevel::Base`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResearchLevel {
    /// Research task started but not completed
    #[default]
    Base,
    /// Research level 10 reached
    Completed,
    /// Research task fully perfected
    Perfect,
}

impl From<String> for ResearchLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "completed" => ResearchLevel::Completed,
            "perfect" => ResearchLevel::Perfect,
            _ => ResearchLevel::Base,
        }
    }
}

impl From<ResearchLevel> for String {
    fn from(level: ResearchLevel) -> Self {
        match level {
            ResearchLevel::Base => "base",
            ResearchLevel::Completed => "completed",
            ResearchLevel::Perfect => "perfect",
        }
        .to_string()
    }
}

/// Recognized hunt modifiers.
///
/// Every field has an explicit weakest-value default, so a session configured
/// without modifiers (or with values from an older client) degrades rather
/// than failing. Unknown keys are dropped at the serde boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HuntModifiers {
    /// Sparkling-power sandwich tier (boosted-item methods)
    pub sandwich_level: SandwichLevel,
    /// Research completion tier (research methods)
    pub research_level: ResearchLevel,
    /// Whether the target appears in a massive outbreak
    pub massive_outbreak: bool,
}

/// Configuration for a new hunt, exactly a [`HuntSession`] minus the fields the
/// store assigns at creation (`id`, `attempt_count`, `partner_counts`,
/// `started_at`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HuntConfig {
    /// Catalog id of the hunted species
    pub pokemon_id: String,
    /// Display name of the hunted species
    pub pokemon_name: String,
    /// Game the hunt takes place in
    pub game_id: String,
    /// Hunting method in use
    pub method_id: String,
    /// Whether the trainer holds a Shiny Charm
    pub has_charm: bool,
    /// Active hunt modifiers
    #[serde(default)]
    pub modifiers: HuntModifiers,
    /// Whether this hunt is shared with a team
    #[serde(default)]
    pub is_group_hunt: bool,
    /// Team the hunt is shared with; required when `is_group_hunt` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

/// One active hunt toward a single catalog target, tracked by attempt count.
///
/// This is the "pure" domain model the engine operates on. For a group hunt,
/// teammates' independently reported counts live in `partner_counts`; the
/// session total is the own count plus the sum of all partner counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HuntSession {
    /// Unique session identifier (UUID format), assigned at creation
    pub id: String,
    /// Catalog id of the hunted species
    pub pokemon_id: String,
    /// Display name of the hunted species
    pub pokemon_name: String,
    /// Game the hunt takes place in
    pub game_id: String,
    /// Hunting method in use
    pub method_id: String,
    /// Whether the trainer holds a Shiny Charm
    pub has_charm: bool,
    /// Active hunt modifiers
    #[serde(default)]
    pub modifiers: HuntModifiers,
    /// Number of attempts recorded so far
    pub attempt_count: u32,
    /// Whether this hunt is shared with a team
    #[serde(default)]
    pub is_group_hunt: bool,
    /// Team the hunt is shared with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Teammate id to last reported attempt count
    #[serde(default)]
    pub partner_counts: HashMap<String, u32>,
    /// Timestamp when the hunt was started (ISO 8601 format)
    pub started_at: String,
}

impl HuntSession {
    /// Creates a fresh session from a configuration, with a new id, a zero
    /// attempt count and no partner reports.
    pub fn new(config: HuntConfig) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pokemon_id: config.pokemon_id,
            pokemon_name: config.pokemon_name,
            game_id: config.game_id,
            method_id: config.method_id,
            has_charm: config.has_charm,
            modifiers: config.modifiers,
            attempt_count: 0,
            is_group_hunt: config.is_group_hunt,
            team_id: config.team_id,
            partner_counts: HashMap::new(),
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Combined attempt count for display: own attempts plus every teammate's
    /// last reported count.
    pub fn total_count(&self) -> u64 {
        self.attempt_count as u64 + self.partner_counts.values().map(|c| *c as u64).sum::<u64>()
    }
}
