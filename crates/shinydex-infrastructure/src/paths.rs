//! Unified path management for shinydex files.
//!
//! All configuration and session data live under the platform's standard
//! directories, resolved once here so every storage adapter agrees on the
//! layout.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/shinydex/          # Config directory
//! └── config.toml              # Trainer identity + probability overrides
//!
//! ~/.local/share/shinydex/     # Data directory
//! └── hunting-storage.json     # Persisted session snapshot
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for shinydex.
pub struct ShinydexPaths;

impl ShinydexPaths {
    /// Returns the shinydex configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/shinydex/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("shinydex"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the shinydex data directory, used for the session snapshot.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("shinydex"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session snapshot.
    pub fn session_storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join(crate::json_session_repository::STORAGE_NAME))
    }
}
