//! Mood taxonomy
//!
//! Maps fine-grained emotion labels (the GoEmotions vocabulary the
//! inference sidecar is trained on) to the small set of coarse moods
//! the catalog filter engine matches against.
//!
//! The mapping is many-to-one and fixed at build time. It lives in one
//! named table so a taxonomy change is a single edit, not a hunt
//! through conditionals. Changing it changes playlist behavior
//! system-wide.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The fine-grained emotion vocabulary, in model output order
///
/// 28 labels including the catch-all "neutral". The inference sidecar
/// only ever emits labels from this set, but `map_to_mood` does not
/// rely on that.
pub const EMOTION_LABELS: [&str; 28] = [
    "admiration",
    "amusement",
    "anger",
    "annoyance",
    "approval",
    "caring",
    "confusion",
    "curiosity",
    "desire",
    "disappointment",
    "disapproval",
    "disgust",
    "embarrassment",
    "excitement",
    "fear",
    "gratitude",
    "grief",
    "joy",
    "love",
    "nervousness",
    "optimism",
    "pride",
    "realization",
    "relief",
    "remorse",
    "sadness",
    "surprise",
    "neutral",
];

/// The fine-grained label substituted when nothing survives aggregation
pub const NEUTRAL_LABEL: &str = "neutral";

/// Coarse mood category used for playlist matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Excited,
    Happy,
    Neutral,
    Sad,
}

impl Mood {
    /// Tag string as the catalog filter engine expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Excited => "excited",
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotion → mood mapping table
///
/// Every entry of `EMOTION_LABELS` appears here explicitly, so the
/// fallback in `map_to_mood` only fires for labels outside the known
/// vocabulary.
static MOOD_MAPPINGS: Lazy<HashMap<&'static str, Mood>> = Lazy::new(build_mood_mappings);

fn build_mood_mappings() -> HashMap<&'static str, Mood> {
    let mut mappings = HashMap::new();

    // Upbeat
    mappings.insert("joy", Mood::Happy);
    mappings.insert("amusement", Mood::Happy);
    mappings.insert("approval", Mood::Happy);
    mappings.insert("admiration", Mood::Happy);
    mappings.insert("gratitude", Mood::Happy);
    mappings.insert("love", Mood::Happy);
    mappings.insert("relief", Mood::Happy);
    mappings.insert("caring", Mood::Happy);

    // High energy
    mappings.insert("excitement", Mood::Excited);
    mappings.insert("optimism", Mood::Excited);
    mappings.insert("pride", Mood::Excited);
    mappings.insert("surprise", Mood::Excited);
    mappings.insert("desire", Mood::Excited);

    // Downbeat; anger and disgust land here because the engine's
    // catalog has no separate aggressive category
    mappings.insert("sadness", Mood::Sad);
    mappings.insert("grief", Mood::Sad);
    mappings.insert("disappointment", Mood::Sad);
    mappings.insert("remorse", Mood::Sad);
    mappings.insert("embarrassment", Mood::Sad);
    mappings.insert("nervousness", Mood::Sad);
    mappings.insert("fear", Mood::Sad);
    mappings.insert("anger", Mood::Sad);
    mappings.insert("annoyance", Mood::Sad);
    mappings.insert("disapproval", Mood::Sad);
    mappings.insert("disgust", Mood::Sad);

    // Ambiguous
    mappings.insert("neutral", Mood::Neutral);
    mappings.insert("realization", Mood::Neutral);
    mappings.insert("confusion", Mood::Neutral);
    mappings.insert("curiosity", Mood::Neutral);

    mappings
}

/// Map a fine-grained emotion label to its coarse mood
///
/// Total over all input strings: labels outside the vocabulary map to
/// `Mood::Neutral`. Should not occur with a well-behaved sidecar, but
/// labels cross a process boundary and are not trusted.
pub fn map_to_mood(label: &str) -> Mood {
    MOOD_MAPPINGS.get(label).copied().unwrap_or(Mood::Neutral)
}
