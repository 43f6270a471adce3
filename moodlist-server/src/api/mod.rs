//! HTTP API handlers for moodlist-server

pub mod classify;
pub mod health;
pub mod playlist;

pub use classify::classify_routes;
pub use health::health_routes;
pub use playlist::playlist_routes;

use axum::Json;
use serde_json::json;

/// GET /
///
/// Service banner with endpoint listing.
pub async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "name": "MoodList API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "classify": "/api/classify",
            "analyze": "/api/analyze",
            "playlist": "/api/playlist",
            "playlist_full": "/api/playlist/full",
            "health": "/api/health",
        }
    }))
}
