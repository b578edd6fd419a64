// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Response types for the embedding, health and info endpoints

use crate::version;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Response body for POST / and POST /passage
///
/// # Example
/// ```json
/// {
///   "embedding": [0.012, -0.034, ...],
///   "dimension": 1024
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedResponse {
    /// L2-normalized embedding vector
    pub embedding: Vec<f32>,

    /// Length of the embedding vector (1024 for e5-large-v2)
    pub dimension: usize,
}

impl From<Vec<f32>> for EmbedResponse {
    fn from(embedding: Vec<f32>) -> Self {
        let dimension = embedding.len();
        EmbedResponse {
            embedding,
            dimension,
        }
    }
}

/// Response body for POST /index
///
/// The embedding itself is not echoed back; it is forwarded to the queue
/// service instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub success: bool,
    pub dimension: usize,
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

impl HealthResponse {
    pub fn new(model_loaded: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            model_loaded,
        }
    }
}

/// Static service metadata returned by GET /
pub fn service_info() -> Value {
    json!({
        "message": "Text Embedding Service",
        "description": "High-quality semantic embeddings optimized for similarity tasks",
        "version": version::VERSION_NUMBER,
        "model": version::MODEL_NAME,
        "output_dimension": version::OUTPUT_DIMENSION,
        "usage": {
            "query": "POST / with JSON body containing 'text' field",
            "passage": "POST /passage with JSON body containing 'text' field",
            "index": "POST /index to embed as passage and forward to the vector queue"
        },
        "features": ["normalized_embeddings", "query_passage_prefixing", "queue_forwarding"]
    })
}
