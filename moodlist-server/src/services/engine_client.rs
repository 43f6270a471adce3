//! Catalog filter engine client
//!
//! Invokes the native playlist-filtering engine as a subprocess. The
//! engine takes exactly two positional arguments (catalog file path,
//! comma-joined mood tags), prints `{"songs": [...], "count": n}` on
//! stdout, and reports failures as a non-zero exit with a message on
//! stderr.
//!
//! One invocation per call, no retries. Retries belong to callers.

use crate::models::{PlaylistQuery, PlaylistResult, Song};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Engine invocation errors
///
/// `NotFound` is distinct from `NonZeroExit` so callers can tell "not
/// deployed" from "ran and errored".
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine executable missing or not launchable
    #[error("Catalog filter engine not found: {0}")]
    NotFound(String),

    /// Engine failed to start for a reason other than a missing binary
    #[error("Failed to launch catalog filter engine: {0}")]
    Spawn(String),

    /// Engine exceeded the wall-clock timeout and was killed
    #[error("Catalog filter engine timed out after {0:?}")]
    Timeout(Duration),

    /// Engine ran and exited non-zero; stderr carried for diagnostics
    #[error("Catalog filter engine failed (exit code {code:?}): {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },

    /// Engine exited zero but stdout was not a valid playlist document
    #[error("Catalog filter engine produced malformed output: {reason}")]
    MalformedOutput { reason: String, raw: String },
}

/// Narrow capability for song selection by mood
///
/// The orchestration workflow only sees this trait, so the subprocess
/// client can be swapped for an in-process implementation or a test
/// double without touching the workflow.
#[async_trait]
pub trait CatalogFilter: Send + Sync {
    /// Select songs matching the query's moods from its catalog
    async fn filter(&self, query: &PlaylistQuery) -> Result<PlaylistResult, EngineError>;
}

/// Engine stdout document
#[derive(Debug, Deserialize)]
struct EngineOutput {
    songs: Vec<Song>,
    count: usize,
}

/// Subprocess-backed `CatalogFilter`
pub struct FilterEngineClient {
    engine_path: PathBuf,
    timeout: Duration,
}

impl FilterEngineClient {
    pub fn new(engine_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            engine_path: engine_path.into(),
            timeout,
        }
    }

    /// Second positional argument: moods joined with commas, no
    /// surrounding whitespace, no trailing comma
    fn moods_arg(moods: &[String]) -> String {
        moods.join(",")
    }
}

#[async_trait]
impl CatalogFilter for FilterEngineClient {
    async fn filter(&self, query: &PlaylistQuery) -> Result<PlaylistResult, EngineError> {
        let moods_arg = Self::moods_arg(&query.moods);

        tracing::debug!(
            engine = %self.engine_path.display(),
            catalog = %query.catalog_path.display(),
            moods = %moods_arg,
            "Invoking catalog filter engine"
        );

        // kill_on_drop covers both the timeout path below and an
        // abandoned request dropping the future mid-flight.
        let child = Command::new(&self.engine_path)
            .arg(&query.catalog_path)
            .arg(&moods_arg)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EngineError::NotFound(self.engine_path.display().to_string()));
            }
            Err(e) => return Err(EngineError::Spawn(e.to_string())),
        };

        // wait_with_output captures stdout and stderr on separate pipes.
        // On timeout the future owning the child is dropped, which kills
        // the process; the call never blocks past the deadline.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(EngineError::Spawn(e.to_string())),
            Err(_) => {
                tracing::warn!(
                    engine = %self.engine_path.display(),
                    timeout = ?self.timeout,
                    "Catalog filter engine timed out, killing process"
                );
                return Err(EngineError::Timeout(self.timeout));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(EngineError::NonZeroExit {
                code: output.status.code(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let parsed: EngineOutput =
            serde_json::from_str(&stdout).map_err(|e| EngineError::MalformedOutput {
                reason: e.to_string(),
                raw: stdout.to_string(),
            })?;

        if parsed.count != parsed.songs.len() {
            tracing::warn!(
                reported = parsed.count,
                actual = parsed.songs.len(),
                "Engine song count disagrees with song list, using list length"
            );
        }

        tracing::debug!(songs = parsed.songs.len(), "Catalog filter engine completed");

        Ok(PlaylistResult {
            count: parsed.songs.len(),
            songs: parsed.songs,
        })
    }
}
