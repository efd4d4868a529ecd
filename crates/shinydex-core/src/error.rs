//! Error types for the Shinydex engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole Shinydex workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
///
/// The hunting engine itself surfaces exactly one failure to its callers:
/// [`ShinydexError::SessionLimitReached`]. Everything else (unknown game or
/// method ids, stale realtime deliveries, ambiguous merge inputs) degrades to
/// documented fallback values instead of erroring. The remaining variants
/// belong to the persistence and configuration layers.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ShinydexError {
    /// The per-user concurrent session cap was hit
    #[error("Session limit reached: {max} concurrent hunts are already running")]
    SessionLimitReached { max: usize },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShinydexError {
    /// Creates a SessionLimitReached error
    pub fn session_limit(max: usize) -> Self {
        Self::SessionLimitReached { max }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is the capacity rejection from `start_session`
    pub fn is_session_limit(&self) -> bool {
        matches!(self, Self::SessionLimitReached { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ShinydexError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ShinydexError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ShinydexError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ShinydexError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ShinydexError>`.
pub type Result<T> = std::result::Result<T, ShinydexError>;
