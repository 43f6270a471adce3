//! Orchestration workflow
//!
//! Sequences the aggregator and the external collaborators into the
//! three public operations (classify-only, playlist-only, full
//! pipeline).

pub mod pipeline;

pub use pipeline::{FullAnalysis, Pipeline};
