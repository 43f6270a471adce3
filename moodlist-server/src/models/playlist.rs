//! Playlist query and result types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A song as returned by the catalog filter engine
///
/// Opaque to this service: the engine owns the record shape, we only
/// count songs and pass them through.
pub type Song = serde_json::Value;

/// One engine invocation's input, built once per request
#[derive(Debug, Clone)]
pub struct PlaylistQuery {
    /// Catalog file handed to the engine as its first argument
    pub catalog_path: PathBuf,
    /// Mood tags to match; non-empty, entries trimmed and non-blank
    pub moods: Vec<String>,
}

/// Parsed engine output
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistResult {
    /// Matching songs, order as produced by the engine
    pub songs: Vec<Song>,
    /// Number of songs; always equals `songs.len()` after parsing
    pub count: usize,
}

/// Playlist section of an operation response: engine output plus the
/// moods that produced it
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistSelection {
    /// Mood tags the engine matched against, echoed for the caller
    pub moods: Vec<String>,
    pub songs: Vec<Song>,
    pub count: usize,
}

impl PlaylistSelection {
    pub fn new(moods: Vec<String>, result: PlaylistResult) -> Self {
        Self {
            moods,
            songs: result.songs,
            count: result.count,
        }
    }
}
