// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Router-level endpoint tests
//!
//! These tests run the real router via `tower::ServiceExt::oneshot` with an
//! unloaded model (`model: None`), which exercises every path that must work
//! without model weights on disk: health reporting, service metadata, and
//! the model-unavailable error responses.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use embedder_node::api::{build_router, AppState};
use embedder_node::embeddings::OnnxEmbeddingModel;
use embedder_node::queue::QueueClient;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const MODEL_PATH: &str = "./models/e5-large-v2/model.onnx";
const TOKENIZER_PATH: &str = "./models/e5-large-v2/tokenizer.json";

/// State with no model loaded and a queue target nobody listens on.
fn state_without_model() -> AppState {
    AppState {
        model: None,
        queue: Arc::new(QueueClient::new("http://127.0.0.1:1/api/queue").unwrap()),
    }
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_model_not_loaded() {
    let app = build_router(state_without_model());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model_loaded"], false);
}

#[tokio::test]
async fn test_root_info_is_static_metadata() {
    let app = build_router(state_without_model());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // GET / never fails, regardless of model state
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["output_dimension"], 1024);
    assert_eq!(json["model"], "e5-large-v2");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_embed_without_model_is_server_error() {
    for uri in ["/", "/passage", "/index"] {
        let app = build_router(state_without_model());

        let response = app
            .oneshot(json_post(uri, r#"{"text": "hello"}"#))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "POST {} without a loaded model must be a server error",
            uri
        );

        let json = body_json(response).await;
        assert_eq!(json["error_type"], "model_unavailable");
    }
}

#[tokio::test]
async fn test_malformed_body_is_client_error() {
    let app = build_router(state_without_model());

    let response = app.oneshot(json_post("/", "not json")).await.unwrap();

    assert!(
        response.status().is_client_error(),
        "Malformed JSON must not be a server error, got {}",
        response.status()
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = build_router(state_without_model());

    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_index_succeeds_when_queue_unreachable() {
    let model = OnnxEmbeddingModel::new("e5-large-v2", MODEL_PATH, TOKENIZER_PATH)
        .await
        .unwrap();

    // Port 1 is never listening, so every forward attempt fails
    let state = AppState {
        model: Some(Arc::new(model)),
        queue: Arc::new(QueueClient::new("http://127.0.0.1:1/api/queue").unwrap()),
    };
    let app = build_router(state);

    let response = app
        .oneshot(json_post("/index", r#"{"text": "a passage worth indexing"}"#))
        .await
        .unwrap();

    // Forwarding is best-effort; its failure must not change the response
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["dimension"], 1024);
}

#[tokio::test]
async fn test_health_is_get_only() {
    let app = build_router(state_without_model());

    let response = app
        .oneshot(json_post("/health", r#"{}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
