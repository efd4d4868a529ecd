//! Team domain module.
//!
//! Broadcast event types and the roster model for collaborative hunts.

mod event;
mod member;

// Re-export public API
pub use event::{SessionAnnouncement, TeamEvent};
pub use member::{TeamMember, UNKNOWN_TRAINER};
