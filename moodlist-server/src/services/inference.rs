//! Emotion inference client
//!
//! HTTP JSON client for the inference sidecar, which runs the actual
//! text classifier and returns a score-ordered label distribution.
//! The sidecar's internals (model, tokenization, hardware) are opaque
//! to this service.

use crate::models::ScoredLabel;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;

const USER_AGENT: &str = concat!("moodlist/", env!("CARGO_PKG_VERSION"));

/// Inference client errors
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Sidecar unreachable (connection refused, DNS, client build)
    #[error("Inference service unavailable: {0}")]
    Unavailable(String),

    /// Sidecar reachable but returned a non-success status
    #[error("Inference service error {status}: {body}")]
    Api { status: u16, body: String },

    /// Sidecar response body did not match the expected shape
    #[error("Failed to parse inference response: {0}")]
    Parse(String),
}

/// Narrow capability for emotion classification
///
/// Returns the scored-label distribution ordered descending by score.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Vec<ScoredLabel>, InferenceError>;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    labels: Vec<ScoredLabel>,
}

/// HTTP-backed `EmotionClassifier`
pub struct InferenceClient {
    http_client: reqwest::Client,
    classify_url: String,
}

impl InferenceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InferenceError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceError::Unavailable(e.to_string()))?;

        Ok(Self {
            http_client,
            classify_url: format!("{}/classify", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl EmotionClassifier for InferenceClient {
    async fn classify(&self, text: &str) -> Result<Vec<ScoredLabel>, InferenceError> {
        let response = self
            .http_client
            .post(&self.classify_url)
            .json(&InferenceRequest { text })
            .send()
            .await
            .map_err(|e| InferenceError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Parse(e.to_string()))?;

        tracing::debug!(labels = parsed.labels.len(), "Inference completed");

        Ok(parsed.labels)
    }
}

/// Factory producing the process-wide classifier on first use
pub type ClassifierFactory =
    Box<dyn Fn() -> Result<Arc<dyn EmotionClassifier>, InferenceError> + Send + Sync>;

/// Process-lifetime classifier handle
///
/// The one piece of shared state in the service: created lazily on the
/// first classify request, initialized at most once under concurrent
/// first-use, read-only afterwards. A failed initialization is not
/// cached; the next request retries.
pub struct ClassifierHandle {
    cell: OnceCell<Arc<dyn EmotionClassifier>>,
    factory: ClassifierFactory,
}

impl ClassifierHandle {
    /// Lazy handle: `factory` runs on first `get`
    pub fn new(factory: ClassifierFactory) -> Self {
        Self {
            cell: OnceCell::new(),
            factory,
        }
    }

    /// Pre-initialized handle; the factory never runs. For wiring test
    /// doubles and in-process classifiers.
    pub fn preset(classifier: Arc<dyn EmotionClassifier>) -> Self {
        Self {
            cell: OnceCell::new_with(Some(classifier)),
            factory: Box::new(|| {
                Err(InferenceError::Unavailable(
                    "preset handle has no factory".to_string(),
                ))
            }),
        }
    }

    pub async fn get(&self) -> Result<&Arc<dyn EmotionClassifier>, InferenceError> {
        self.cell
            .get_or_try_init(|| async {
                tracing::info!("Initializing emotion classifier handle");
                (self.factory)()
            })
            .await
    }
}
