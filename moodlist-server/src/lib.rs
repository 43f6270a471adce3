//! moodlist-server library interface
//!
//! Exposes the router and state so integration tests can drive the
//! API in-process.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod taxonomy;
pub mod workflow;

pub use crate::error::{ApiError, ApiResult};

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::workflow::Pipeline;

/// Dev frontend origins, mirroring what the UI serves from
const CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Operation pipelines over the classifier and the catalog filter
    pub pipeline: Arc<Pipeline>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            startup_time: Utc::now(),
        }
    }
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = CORS_ORIGINS
        .iter()
        .copied()
        .map(HeaderValue::from_static)
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(api::classify_routes())
        .merge(api::playlist_routes())
        .merge(api::health_routes());

    Router::new()
        .route("/", get(api::index))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
