//! Classification result types

use crate::taxonomy::Mood;
use serde::{Deserialize, Serialize};

/// One emotion label with its probability
///
/// Produced only by the inference sidecar. Probabilities across the
/// full vocabulary sum to 1 for one input; the aggregator only ever
/// sees a prefix of that distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    /// Fine-grained emotion label
    #[serde(alias = "emotion")]
    pub label: String,
    /// Probability in [0.0, 1.0]
    pub score: f32,
}

impl ScoredLabel {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Aggregated classification for one input text
///
/// Invariants:
/// - `dominant_label == top_labels[0].label` and
///   `confidence == top_labels[0].score` when `top_labels` is non-empty
/// - otherwise `dominant_label == "neutral"` and `confidence == 0.0`
/// - `moods` is sorted and deduplicated; it may be empty here — the
///   workflow substitutes `[neutral]` before any engine invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The input text, echoed back
    pub text: String,
    /// Labels surviving top-k truncation and the score threshold,
    /// descending by score
    pub top_labels: Vec<ScoredLabel>,
    /// Coarse moods derived from the retained labels
    pub moods: Vec<Mood>,
    /// Highest-scoring retained label, or "neutral" if none survived
    pub dominant_label: String,
    /// Score of the dominant label, or 0.0 if none survived
    pub confidence: f32,
}
