// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! HTTP handlers for the embedding endpoints
//!
//! All three POST endpoints follow the same linear shape: check the model is
//! loaded, validate the input, prefix it for e5, run inference, respond.
//! `/index` additionally forwards the result to the vector queue,
//! best-effort.

use crate::api::embed::{EmbedRequest, EmbedResponse, IndexResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::embeddings::{preprocess_text, OnnxEmbeddingModel, TaskType};
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::warn;

/// Runs the shared precondition-validate-embed sequence for one request.
async fn embed_with_task(
    state: &AppState,
    request: &EmbedRequest,
    task: TaskType,
) -> Result<Vec<f32>, ApiError> {
    let model: &Arc<OnnxEmbeddingModel> =
        state.model.as_ref().ok_or(ApiError::ModelUnavailable)?;

    request.validate()?;

    let processed = preprocess_text(&request.text, task);

    model
        .embed(&processed)
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))
}

/// POST / handler
///
/// Embeds input text as a search query (prefixed with `"query: "`).
pub async fn embed_query_handler(
    State(state): State<AppState>,
    Json(request): Json<EmbedRequest>,
) -> Result<Json<EmbedResponse>, ApiError> {
    let embedding = embed_with_task(&state, &request, TaskType::Query).await?;
    Ok(Json(EmbedResponse::from(embedding)))
}

/// POST /passage handler
///
/// Embeds input text as a document passage (prefixed with `"passage: "`).
/// Use this for indexing descriptions, titles, etc.
pub async fn embed_passage_handler(
    State(state): State<AppState>,
    Json(request): Json<EmbedRequest>,
) -> Result<Json<EmbedResponse>, ApiError> {
    let embedding = embed_with_task(&state, &request, TaskType::Passage).await?;
    Ok(Json(EmbedResponse::from(embedding)))
}

/// POST /index handler
///
/// Embeds input text as a passage and forwards the result to the vector
/// queue service. Forwarding is best-effort: a failed forward is logged and
/// the request still reports success.
pub async fn index_handler(
    State(state): State<AppState>,
    Json(request): Json<EmbedRequest>,
) -> Result<Json<IndexResponse>, ApiError> {
    let embedding = embed_with_task(&state, &request, TaskType::Passage).await?;
    let dimension = embedding.len();

    if let Err(e) = state.queue.forward(embedding, &request.text).await {
        warn!("Queue forwarding failed (ignored): {}", e);
    }

    Ok(Json(IndexResponse {
        success: true,
        dimension,
    }))
}
