//! Integration tests for the moodlist-server API endpoints
//!
//! Drives the real router in-process with test doubles standing in
//! for the two external collaborators.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use moodlist_server::models::{PlaylistQuery, PlaylistResult, ScoredLabel};
use moodlist_server::services::{
    CatalogFilter, ClassifierHandle, EmotionClassifier, EngineError, InferenceError,
};
use moodlist_server::workflow::Pipeline;
use moodlist_server::AppState;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::util::ServiceExt;

struct StubClassifier(Vec<ScoredLabel>);

#[async_trait]
impl EmotionClassifier for StubClassifier {
    async fn classify(&self, _text: &str) -> Result<Vec<ScoredLabel>, InferenceError> {
        Ok(self.0.clone())
    }
}

enum StubFilter {
    Songs(Vec<Value>),
    Fail(fn() -> EngineError),
}

#[async_trait]
impl CatalogFilter for StubFilter {
    async fn filter(&self, query: &PlaylistQuery) -> Result<PlaylistResult, EngineError> {
        match self {
            StubFilter::Songs(songs) => {
                // Echo the query moods into each song so tests can
                // observe what reached the engine
                let songs: Vec<Value> = songs
                    .iter()
                    .map(|song| {
                        let mut song = song.clone();
                        song["matched"] = json!(query.moods.join(","));
                        song
                    })
                    .collect();
                Ok(PlaylistResult {
                    count: songs.len(),
                    songs,
                })
            }
            StubFilter::Fail(make_error) => Err(make_error()),
        }
    }
}

/// Test helper: build the app with a scripted distribution and filter
fn create_test_app(distribution: &[(&str, f32)], filter: StubFilter) -> axum::Router {
    let classifier = Arc::new(StubClassifier(
        distribution
            .iter()
            .map(|(label, score)| ScoredLabel::new(*label, *score))
            .collect(),
    ));

    let pipeline = Pipeline::new(
        ClassifierHandle::preset(classifier),
        Arc::new(filter),
        PathBuf::from("songs.csv"),
    );

    moodlist_server::build_router(AppState::new(pipeline))
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(&[], StubFilter::Songs(vec![]));
    let (status, json) = get_json(app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "moodlist-server");
}

#[tokio::test]
async fn test_index_banner() {
    let app = create_test_app(&[], StubFilter::Songs(vec![]));
    let (status, json) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "MoodList API");
    assert_eq!(json["endpoints"]["classify"], "/api/classify");
}

#[tokio::test]
async fn test_classify_success() {
    let app = create_test_app(
        &[("joy", 0.82), ("excitement", 0.15), ("neutral", 0.03)],
        StubFilter::Songs(vec![]),
    );
    let (status, json) = post_json(app, "/api/classify", json!({"text": "I feel great"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["text"], "I feel great");
    assert_eq!(json["top_labels"].as_array().unwrap().len(), 2);
    assert_eq!(json["top_labels"][0]["label"], "joy");
    assert_eq!(json["moods"], json!(["excited", "happy"]));
    assert_eq!(json["dominant_label"], "joy");
    assert!((json["confidence"].as_f64().unwrap() - 0.82).abs() < 1e-6);
}

#[tokio::test]
async fn test_classify_blank_text_rejected() {
    let app = create_test_app(&[("joy", 0.82)], StubFilter::Songs(vec![]));
    let (status, json) = post_json(app, "/api/classify", json!({"text": "   "})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_classify_zero_top_k_rejected() {
    let app = create_test_app(&[("joy", 0.82)], StubFilter::Songs(vec![]));
    let (status, json) = post_json(
        app,
        "/api/classify",
        json!({"text": "hello", "top_k": 0}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_classify_default_top_k_applies() {
    // Four labels above threshold, default top_k = 3
    let app = create_test_app(
        &[("joy", 0.4), ("amusement", 0.3), ("relief", 0.2), ("pride", 0.1)],
        StubFilter::Songs(vec![]),
    );
    let (status, json) = post_json(app, "/api/classify", json!({"text": "good times"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["top_labels"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_classify_below_threshold_yields_neutral_fallback() {
    let app = create_test_app(&[("joy", 0.05)], StubFilter::Songs(vec![]));
    let (status, json) = post_json(app, "/api/classify", json!({"text": "hm"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["top_labels"], json!([]));
    assert_eq!(json["moods"], json!([]));
    assert_eq!(json["dominant_label"], "neutral");
    assert_eq!(json["confidence"], 0.0);
}

#[tokio::test]
async fn test_playlist_success() {
    let app = create_test_app(&[], StubFilter::Songs(vec![json!({"id": 1, "title": "Happy Song"})]));
    let (status, json) = post_json(
        app,
        "/api/playlist",
        json!({"moods": ["happy", "excited"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["moods"], json!(["happy", "excited"]));
    assert_eq!(json["count"], 1);
    assert_eq!(json["songs"][0]["title"], "Happy Song");
    assert_eq!(json["songs"][0]["matched"], "happy,excited");
}

#[tokio::test]
async fn test_playlist_empty_moods_rejected() {
    let app = create_test_app(&[], StubFilter::Songs(vec![]));
    let (status, json) = post_json(app, "/api/playlist", json!({"moods": []})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_playlist_blank_mood_rejected() {
    let app = create_test_app(&[], StubFilter::Songs(vec![]));
    let (status, json) = post_json(app, "/api/playlist", json!({"moods": ["happy", " "]})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_playlist_engine_not_found() {
    let app = create_test_app(
        &[],
        StubFilter::Fail(|| EngineError::NotFound("emotion_playlist".to_string())),
    );
    let (status, json) = post_json(app, "/api/playlist", json!({"moods": ["happy"]})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"]["code"], "ENGINE_NOT_FOUND");
    assert!(json.get("songs").is_none());
}

#[tokio::test]
async fn test_playlist_engine_timeout_maps_to_504() {
    let app = create_test_app(
        &[],
        StubFilter::Fail(|| EngineError::Timeout(std::time::Duration::from_secs(10))),
    );
    let (status, json) = post_json(app, "/api/playlist", json!({"moods": ["happy"]})).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["error"]["code"], "ENGINE_TIMEOUT");
}

#[tokio::test]
async fn test_full_playlist_combines_sections() {
    let app = create_test_app(
        &[("joy", 0.82), ("excitement", 0.15)],
        StubFilter::Songs(vec![json!({"id": 7})]),
    );
    let (status, json) = post_json(
        app,
        "/api/playlist/full",
        json!({"text": "what a day"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["text"], "what a day");
    assert_eq!(json["classification"]["dominant_label"], "joy");
    assert_eq!(json["playlist"]["moods"], json!(["excited", "happy"]));
    assert_eq!(json["playlist"]["count"], 1);
}

#[tokio::test]
async fn test_full_playlist_substitutes_neutral() {
    let app = create_test_app(&[("joy", 0.05)], StubFilter::Songs(vec![json!({"id": 1})]));
    let (status, json) = post_json(app, "/api/playlist/full", json!({"text": "meh"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["classification"]["moods"], json!([]));
    assert_eq!(json["playlist"]["moods"], json!(["neutral"]));
    assert_eq!(json["playlist"]["songs"][0]["matched"], "neutral");
}

#[tokio::test]
async fn test_full_playlist_engine_failure_yields_single_envelope() {
    let app = create_test_app(
        &[("joy", 0.82)],
        StubFilter::Fail(|| EngineError::NonZeroExit {
            code: Some(2),
            stderr: "catalog not found".to_string(),
        }),
    );
    let (status, json) = post_json(app, "/api/playlist/full", json!({"text": "so happy"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"]["code"], "ENGINE_FAILED");
    // No partial classification section alongside the error
    assert!(json.get("classification").is_none());
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("catalog not found"));
}

#[tokio::test]
async fn test_analyze_shape() {
    let app = create_test_app(
        &[("joy", 0.82)],
        StubFilter::Songs(vec![json!({"id": 1, "title": "Happy Song"})]),
    );
    let (status, json) = post_json(app, "/api/analyze", json!({"text": "great day"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["emotion"], "joy");
    assert!((json["confidence"].as_f64().unwrap() - 0.82).abs() < 1e-6);
    assert_eq!(json["playlist"][0]["title"], "Happy Song");
}
