// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod embeddings;
pub mod queue;
pub mod version;

// Re-export main types
pub use api::{
    build_router, start_server, ApiError, AppState, EmbedRequest, EmbedResponse, ErrorResponse,
    HealthResponse, IndexResponse,
};
pub use embeddings::{l2_normalize, preprocess_text, OnnxEmbeddingModel, TaskType};
pub use queue::{QueueClient, QueuePayload};
