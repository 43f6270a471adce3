//! Emotion result aggregation
//!
//! Turns a raw label/score distribution from the inference sidecar
//! into a structured classification: top-k truncation, score
//! threshold, coarse-mood mapping, dominant-label resolution.
//!
//! Pure and context-free: no clock, no config, no engine. An empty
//! mood set is returned as-is; substituting `[neutral]` before engine
//! invocation is the workflow's job.

use crate::models::{ClassificationResult, ScoredLabel};
use crate::taxonomy::{self, Mood, NEUTRAL_LABEL};
use moodlist_common::{Error, Result};

/// Aggregate a scored-label distribution into a classification result
///
/// The distribution is expected descending by score (the sidecar sorts
/// before returning), but is re-sorted here defensively; the sort is
/// stable, so equal scores keep their input order and the output is
/// deterministic for equal inputs.
///
/// `top_k == 0` is a caller bug and fails with `InvalidInput` rather
/// than silently returning an empty result. `threshold <= 0.0` retains
/// all top-k entries; a threshold above the highest score yields an
/// empty retained set and the neutral/0.0 fallback.
pub fn aggregate(
    text: &str,
    distribution: &[ScoredLabel],
    top_k: usize,
    threshold: f32,
) -> Result<ClassificationResult> {
    if top_k == 0 {
        return Err(Error::InvalidInput("top_k must be a positive integer".to_string()));
    }

    let mut ranked = distribution.to_vec();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_k.min(ranked.len()));

    let top_labels: Vec<ScoredLabel> = ranked
        .into_iter()
        .filter(|entry| entry.score >= threshold)
        .collect();

    let mut moods: Vec<Mood> = top_labels
        .iter()
        .map(|entry| taxonomy::map_to_mood(&entry.label))
        .collect();
    moods.sort();
    moods.dedup();

    let (dominant_label, confidence) = match top_labels.first() {
        Some(first) => (first.label.clone(), first.score),
        None => (NEUTRAL_LABEL.to_string(), 0.0),
    };

    Ok(ClassificationResult {
        text: text.to_string(),
        top_labels,
        moods,
        dominant_label,
        confidence,
    })
}
