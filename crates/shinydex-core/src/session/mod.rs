//! Hunt session domain module.
//!
//! This module contains the session domain model, the in-memory session
//! registry and the persistence interface.
//!
//! # Module Structure
//!
//! - `model`: session entity and typed modifiers (`HuntSession`, `HuntConfig`,
//!   `HuntModifiers`)
//! - `store`: the mutable registry with the active-session pointer
//!   (`SessionStore`)
//! - `repository`: persistence trait for the store snapshot

mod model;
mod repository;
mod store;

// Re-export public API
pub use model::{HuntConfig, HuntModifiers, HuntSession, ResearchLevel, SandwichLevel};
pub use repository::SessionStoreRepository;
pub use store::{MAX_SESSIONS, SessionStore};
