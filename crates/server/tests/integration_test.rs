//! Integration tests for the HTTP surface.
//!
//! These tests drive the full router over an in-memory document store and
//! a temporary artifact file.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};
use tower::ServiceExt;

use data_loader::{DataIndex, EventRecord, TagField, UserRecord};
use model::ModelManager;
use pipeline::{EngineConfig, SimilarityStrategy};
use server::{AppState, routes};

fn create_test_app(index: DataIndex) -> (Router, TempDir) {
    let dir = tempdir().unwrap();
    let manager = ModelManager::load(
        Arc::new(index),
        EngineConfig::default().with_strategy(SimilarityStrategy::Overlap),
        dir.path().join("model.json"),
    );
    (routes::build_router(AppState::new(Arc::new(manager))), dir)
}

fn create_test_index() -> DataIndex {
    let mut index = DataIndex::new();

    let mut user = UserRecord::new("u1");
    user.username = Some("alice".to_string());
    user.interested_tags = Some(TagField::Delimited("music, food".to_string()));
    index.insert_user(user);

    index.insert_event(
        EventRecord::new("e1")
            .with_creator("c1")
            .with_name("Jazz Night")
            .with_tags(["music"])
            .with_rating(5.0, 2.0),
    );
    index.insert_event(
        EventRecord::new("e2")
            .with_creator("c2")
            .with_tags(["food", "music"]),
    );
    index.insert_event(EventRecord::new("e3").with_creator("c2").inactive());
    index
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = create_test_app(DataIndex::new());

    let (status, body) = send(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_user_recommendations() {
    let (app, _dir) = create_test_app(create_test_index());

    let (status, body) = send(app, get("/recommendations/u1?limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "u1");
    assert_eq!(body["username"], "alice");
    assert_eq!(body["status"], "success");

    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["event_id"], "e2");
    assert_eq!(recs[1]["event_name"], "Jazz Night");
    assert!((recs[1]["hybrid_score"].as_f64().unwrap() - 0.7).abs() < 1e-5);
}

#[tokio::test]
async fn test_unknown_user_is_404() {
    let (app, _dir) = create_test_app(create_test_index());

    let (status, body) = send(app, get("/recommendations/nobody")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_empty_store_returns_empty_list() {
    let mut index = DataIndex::new();
    index.insert_user(UserRecord::new("u1"));
    let (app, _dir) = create_test_app(index);

    let (status, body) = send(app, get("/recommendations/u1")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_retrain_and_model_status() {
    let (app, _dir) = create_test_app(create_test_index());

    let (status, body) = send(app.clone(), get("/model")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "uninitialized");

    let (status, body) = send(app.clone(), post_json("/retrain", &json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Model retrained successfully");

    let (_, body) = send(app, get("/model")).await;
    assert_eq!(body["state"], "trained");
    assert_eq!(body["event_rows"], 2);
    assert_eq!(body["strategy"], "overlap");
}

#[tokio::test]
async fn test_retrain_failure_is_reported() {
    let (app, _dir) = create_test_app(DataIndex::new());

    let (status, body) = send(app, post_json("/retrain", &json!({}))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_neighbor_vote_endpoint() {
    let (app, _dir) = create_test_app(DataIndex::new());
    let payload = json!({
        "currentUser": {"id": "u1", "interestedTags": ["music"], "registeredEvents": ["e1"]},
        "allUsers": [
            {"id": "u2", "interestedTags": [], "registeredEvents": ["e1", "e2"]}
        ],
        "events": [
            {"id": "e3", "tags": ["art"]},
            {"id": "e2", "tags": ["art"]},
            {"id": "e4", "tags": ["music"]}
        ]
    });

    let (status, body) = send(app, post_json("/recommend", &payload)).await;
    assert_eq!(status, StatusCode::OK);

    let ranked = body.as_array().unwrap();
    let ids: Vec<_> = ranked.iter().map(|e| e["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["e4", "e2", "e3"]);
    assert_eq!(ranked[2]["score"], 0.0);
}

#[tokio::test]
async fn test_malformed_neighbor_request_is_bad_request() {
    let (app, _dir) = create_test_app(DataIndex::new());
    let payload = json!({"allUsers": [], "events": [{"id": "e1"}]});

    let (status, body) = send(app, post_json("/recommend", &payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"].as_str().unwrap().contains("currentUser"));
}

#[tokio::test]
async fn test_non_json_neighbor_request_is_bad_request() {
    let (app, _dir) = create_test_app(DataIndex::new());
    let request = Request::builder()
        .method("POST")
        .uri("/recommend")
        .body(Body::from("not json"))
        .unwrap();

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}
