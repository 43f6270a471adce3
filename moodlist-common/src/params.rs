//! Tunable parameter defaults
//!
//! Single source of truth for the default values shared across call
//! sites (request deserialization defaults, config fallbacks). Changing
//! a value here changes behavior everywhere it applies.

/// Default number of top-scoring emotion labels retained per classification
///
/// Valid range: >= 1 (zero is rejected as invalid input)
pub const DEFAULT_TOP_K: usize = 3;

/// Default minimum score for a label to survive aggregation
///
/// Valid range: [0.0, 1.0]. Values <= 0.0 retain all top-k entries;
/// values above the highest score yield an empty retained set.
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.1;

/// Default wall-clock timeout for one catalog filter engine invocation
///
/// The engine is process-cheap; 10 seconds covers cold catalog loads
/// with a wide margin.
pub const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 10;

/// Default request timeout for the inference sidecar HTTP client
pub const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 30;
