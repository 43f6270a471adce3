//! Emotion classification API handlers

use axum::{extract::State, routing::post, Json, Router};
use moodlist_common::params;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::models::{ClassificationResult, Song};
use crate::AppState;

fn default_top_k() -> usize {
    params::DEFAULT_TOP_K
}

fn default_threshold() -> f32 {
    params::DEFAULT_SCORE_THRESHOLD
}

/// POST /api/classify request
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

/// POST /api/classify
///
/// Classify emotions in text. No engine invocation; the mood list may
/// be empty when nothing survives the threshold.
pub async fn classify_text(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> ApiResult<Json<ClassificationResult>> {
    tracing::debug!(
        top_k = request.top_k,
        threshold = request.threshold,
        "Classify request"
    );

    let result = state
        .pipeline
        .classify(&request.text, request.top_k, request.threshold)
        .await?;

    Ok(Json(result))
}

/// POST /api/analyze request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// POST /api/analyze response — trimmed-down full pipeline for UI
/// clients that only want the headline emotion and the songs
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub emotion: String,
    pub confidence: f32,
    pub playlist: Vec<Song>,
}

/// POST /api/analyze
///
/// Full pipeline with default tuning, reshaped for simple clients.
pub async fn analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let analysis = state
        .pipeline
        .full_pipeline(
            &request.text,
            params::DEFAULT_TOP_K,
            params::DEFAULT_SCORE_THRESHOLD,
        )
        .await?;

    Ok(Json(AnalyzeResponse {
        emotion: analysis.classification.dominant_label,
        confidence: analysis.classification.confidence,
        playlist: analysis.playlist.songs,
    }))
}

/// Build classification routes
pub fn classify_routes() -> Router<AppState> {
    Router::new()
        .route("/classify", post(classify_text))
        .route("/analyze", post(analyze_text))
}
