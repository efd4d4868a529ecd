//! Persistence and configuration adapters.
//!
//! File-backed implementations of the core repository traits plus platform
//! path resolution and TOML configuration loading. Nothing here contains
//! hunting logic; the engine stays usable with any other backend that
//! implements the same traits.

mod collection_source;
mod config;
mod json_session_repository;
mod paths;

// Re-export public API
pub use collection_source::StaticCollectionSource;
pub use config::{TrackerConfig, TrainerProfile, load_config};
pub use json_session_repository::JsonSessionRepository;
pub use paths::{PathError, ShinydexPaths};
