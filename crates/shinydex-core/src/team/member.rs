//! Team roster model.

use serde::{Deserialize, Serialize};

/// Display label used when an entry's owner cannot be resolved in the roster.
pub const UNKNOWN_TRAINER: &str = "Trainer";

/// A member of the trainer's team, as reported by the collaboration backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// Backend user id
    pub user_id: String,
    /// Display name
    pub username: String,
}
