//! Configuration resolution for moodlist-server
//!
//! Each setting resolves ENV → TOML → compiled default. A malformed
//! environment value is ignored with a warning rather than aborting
//! startup.

use moodlist_common::config::{env_value, TomlConfig};
use moodlist_common::params;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 5720;
/// Default inference sidecar base URL
pub const DEFAULT_INFERENCE_URL: &str = "http://127.0.0.1:5721";
/// Default engine executable, resolved via PATH
pub const DEFAULT_ENGINE_PATH: &str = "emotion_playlist";
/// Default song catalog location
pub const DEFAULT_CATALOG_PATH: &str = "data/songs.csv";

/// Resolved service configuration, immutable after startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub inference_url: String,
    pub engine_path: PathBuf,
    pub catalog_path: PathBuf,
    pub engine_timeout: Duration,
}

impl ServerConfig {
    /// Resolve from the discovered config file and the environment
    pub fn resolve() -> Self {
        Self::resolve_from(&TomlConfig::discover())
    }

    /// Resolve against an explicit TOML config (environment still wins)
    pub fn resolve_from(toml: &TomlConfig) -> Self {
        let port = resolve_parsed("MOODLIST_PORT", toml.port, DEFAULT_PORT);
        let inference_url = resolve_string(
            "MOODLIST_INFERENCE_URL",
            toml.inference_url.as_deref(),
            DEFAULT_INFERENCE_URL,
        );
        let engine_path = resolve_string(
            "MOODLIST_ENGINE_PATH",
            toml.engine_path.as_deref(),
            DEFAULT_ENGINE_PATH,
        );
        let catalog_path = resolve_string(
            "MOODLIST_CATALOG_PATH",
            toml.catalog_path.as_deref(),
            DEFAULT_CATALOG_PATH,
        );
        let engine_timeout_secs = resolve_parsed(
            "MOODLIST_ENGINE_TIMEOUT_SECS",
            toml.engine_timeout_secs,
            params::DEFAULT_ENGINE_TIMEOUT_SECS,
        );

        Self {
            port,
            inference_url,
            engine_path: PathBuf::from(engine_path),
            catalog_path: PathBuf::from(catalog_path),
            engine_timeout: Duration::from_secs(engine_timeout_secs),
        }
    }
}

/// String setting: ENV → TOML → default
fn resolve_string(env_var: &str, toml_value: Option<&str>, default: &str) -> String {
    if let Some(value) = env_value(env_var) {
        info!("{} loaded from environment", env_var);
        return value;
    }
    match toml_value {
        Some(value) => value.to_string(),
        None => default.to_string(),
    }
}

/// Parsed setting: ENV → TOML → default, unparseable ENV ignored
fn resolve_parsed<T>(env_var: &str, toml_value: Option<T>, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    if let Some(raw) = env_value(env_var) {
        match raw.parse() {
            Ok(value) => {
                info!("{} loaded from environment", env_var);
                return value;
            }
            Err(e) => warn!("Ignoring {}={:?}: {}", env_var, raw, e),
        }
    }
    toml_value.unwrap_or(default)
}
