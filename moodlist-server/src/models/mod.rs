//! Request-scoped data model
//!
//! All entities here are created per request and discarded with the
//! response; there is no persistent store.

pub mod classification;
pub mod playlist;

pub use classification::{ClassificationResult, ScoredLabel};
pub use playlist::{PlaylistQuery, PlaylistResult, PlaylistSelection, Song};
