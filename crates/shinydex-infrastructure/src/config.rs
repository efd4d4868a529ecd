//! Application configuration loading.
//!
//! `config.toml` carries the trainer identity and optional probability-table
//! overrides. A missing file is not an error: defaults apply, matching the
//! engine's degrade-instead-of-fail policy.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shinydex_core::probability::ProbabilityTable;

use crate::paths::ShinydexPaths;

/// The local trainer's identity, used for broadcast attribution and
/// self-echo suppression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerProfile {
    /// Backend user id
    pub user_id: String,
    /// Display name shown to teammates
    pub username: String,
}

impl Default for TrainerProfile {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            username: "Trainer".to_string(),
        }
    }
}

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Local trainer identity
    pub trainer: TrainerProfile,
    /// Rate-table override; `None` means the built-in table
    pub probability: Option<ProbabilityTable>,
}

impl TrackerConfig {
    /// The probability table to hunt with: the override when configured,
    /// otherwise the built-in defaults.
    pub fn probability_table(&self) -> ProbabilityTable {
        self.probability.clone().unwrap_or_default()
    }
}

/// Loads the configuration from the default platform path.
///
/// # Returns
///
/// - `Ok(config)`: parsed file, or defaults when the file (or the config
///   directory itself) does not exist
/// - `Err(_)`: the file exists but cannot be read or parsed
pub fn load_config() -> Result<TrackerConfig> {
    match ShinydexPaths::config_file() {
        Ok(path) => load_config_from(&path),
        Err(_) => Ok(TrackerConfig::default()),
    }
}

/// Loads the configuration from an explicit path.
pub fn load_config_from(path: &Path) -> Result<TrackerConfig> {
    if !path.exists() {
        return Ok(TrackerConfig::default());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("reading config at {path:?}"))?;
    if content.trim().is_empty() {
        return Ok(TrackerConfig::default());
    }

    let config: TrackerConfig =
        toml::from_str(&content).with_context(|| format!("parsing config at {path:?}"))?;
    tracing::debug!(trainer = %config.trainer.username, "loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.trainer.username, "Trainer");
    }

    #[test]
    fn trainer_section_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[trainer]
user_id = "user-1"
username = "Ash"
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();

        assert_eq!(config.trainer.user_id, "user-1");
        assert_eq!(config.trainer.username, "Ash");
        assert!(config.probability.is_none());
    }

    #[test]
    fn probability_override_replaces_builtin_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[probability.games."Scarlet/Violet"]
base_shiny_rate = 2048

[probability.methods."SOS Battle"]
base_rate = 4096
chains = [{ min = 11, rate = 1000 }]
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        let table = config.probability_table();

        assert_eq!(table.game_base_rate("Scarlet/Violet"), Some(2048));
        assert_eq!(table.method("SOS Battle").unwrap().rate_for(15), 1000);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "trainer = [[[").unwrap();

        assert!(load_config_from(&path).is_err());
    }
}
