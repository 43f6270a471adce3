//! moodlist-server - Mood-Matched Playlist Service
//!
//! Turns free-text input into a mood-matched song list:
//! text → emotion distribution (inference sidecar) → coarse moods →
//! song selection (catalog filter engine subprocess).

use anyhow::Result;
use moodlist_common::params;
use moodlist_server::config::ServerConfig;
use moodlist_server::services::{
    ClassifierHandle, EmotionClassifier, FilterEngineClient, InferenceClient,
};
use moodlist_server::workflow::Pipeline;
use moodlist_server::AppState;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting moodlist-server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::resolve();
    info!("Inference sidecar: {}", config.inference_url);
    info!("Filter engine: {}", config.engine_path.display());
    info!("Song catalog: {}", config.catalog_path.display());

    // The classifier handle is the one piece of process-lifetime
    // state: built on first classify request, reused afterwards.
    let inference_url = config.inference_url.clone();
    let classifier = ClassifierHandle::new(Box::new(move || {
        let client = InferenceClient::new(
            &inference_url,
            Duration::from_secs(params::DEFAULT_INFERENCE_TIMEOUT_SECS),
        )?;
        Ok(Arc::new(client) as Arc<dyn EmotionClassifier>)
    }));

    let catalog_filter = Arc::new(FilterEngineClient::new(
        config.engine_path.clone(),
        config.engine_timeout,
    ));

    let pipeline = Pipeline::new(classifier, catalog_filter, config.catalog_path.clone());
    let state = AppState::new(pipeline);
    let app = moodlist_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", config.port)).await?;
    info!("Listening on http://127.0.0.1:{}", config.port);
    info!("Health check: http://127.0.0.1:{}/api/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
