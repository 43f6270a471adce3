//! Playlist generation API handlers

use axum::{extract::State, routing::post, Json, Router};
use moodlist_common::params;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::models::PlaylistSelection;
use crate::workflow::FullAnalysis;
use crate::AppState;

fn default_top_k() -> usize {
    params::DEFAULT_TOP_K
}

fn default_threshold() -> f32 {
    params::DEFAULT_SCORE_THRESHOLD
}

/// POST /api/playlist request
#[derive(Debug, Deserialize)]
pub struct PlaylistRequest {
    pub moods: Vec<String>,
}

/// POST /api/playlist
///
/// Select songs for an explicit mood list, no classification involved.
pub async fn generate_playlist(
    State(state): State<AppState>,
    Json(request): Json<PlaylistRequest>,
) -> ApiResult<Json<PlaylistSelection>> {
    tracing::debug!(moods = ?request.moods, "Playlist request");

    let selection = state.pipeline.playlist(&request.moods).await?;

    Ok(Json(selection))
}

/// POST /api/playlist/full request
#[derive(Debug, Deserialize)]
pub struct FullPlaylistRequest {
    pub text: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

/// POST /api/playlist/full
///
/// Complete workflow: classify the text, then select songs for the
/// derived moods. Response carries both sections.
pub async fn generate_full_playlist(
    State(state): State<AppState>,
    Json(request): Json<FullPlaylistRequest>,
) -> ApiResult<Json<FullAnalysis>> {
    tracing::debug!(
        top_k = request.top_k,
        threshold = request.threshold,
        "Full playlist request"
    );

    let analysis = state
        .pipeline
        .full_pipeline(&request.text, request.top_k, request.threshold)
        .await?;

    Ok(Json(analysis))
}

/// Build playlist routes
pub fn playlist_routes() -> Router<AppState> {
    Router::new()
        .route("/playlist", post(generate_playlist))
        .route("/playlist/full", post(generate_full_playlist))
}
