//! Configuration loading and resolution
//!
//! Every setting resolves with the same priority order:
//! 1. Environment variable (highest priority)
//! 2. TOML config file
//! 3. Compiled default (fallback)
//!
//! A missing config file is never fatal: the service starts with
//! defaults and logs a warning.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable naming an explicit config file path
pub const CONFIG_PATH_ENV: &str = "MOODLIST_CONFIG";

/// TOML configuration file schema
///
/// All fields are optional; a field absent from the file falls through
/// to the compiled default for that setting.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// HTTP listen port
    pub port: Option<u16>,
    /// Base URL of the emotion inference sidecar
    pub inference_url: Option<String>,
    /// Path to the catalog filter engine executable
    pub engine_path: Option<String>,
    /// Path to the song catalog file passed to the engine
    pub catalog_path: Option<String>,
    /// Wall-clock timeout for one engine invocation, in seconds
    pub engine_timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Parse a TOML config file at an explicit path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read TOML failed ({}): {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
    }

    /// Locate and parse the platform config file
    ///
    /// Returns an empty config when no file exists. An unreadable or
    /// malformed file logs a warning and also yields the empty config,
    /// so a bad config file cannot prevent startup.
    pub fn discover() -> Self {
        let Some(path) = config_file_path() else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                Self::default()
            }
        }
    }
}

/// Locate the config file for this process
///
/// Priority order:
/// 1. `MOODLIST_CONFIG` environment variable (explicit path)
/// 2. `~/.config/moodlist/config.toml` (per-user)
/// 3. `/etc/moodlist/config.toml` (system-wide, unix only)
///
/// Returns `None` when no candidate file exists.
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(explicit) = env_value(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(explicit));
    }

    if let Some(user_config) = dirs::config_dir().map(|d| d.join("moodlist").join("config.toml")) {
        if user_config.exists() {
            return Some(user_config);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/moodlist/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Read an environment variable, treating empty/whitespace values as unset
pub fn env_value(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}
