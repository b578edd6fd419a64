// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use embedder_node::{
    api::{start_server, AppState},
    embeddings::OnnxEmbeddingModel,
    queue::QueueClient,
    version,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!("Starting {}", version::get_version_string());

    // Parse environment variables for configuration
    let port = env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .unwrap_or(8000);
    let model_path =
        env::var("MODEL_PATH").unwrap_or_else(|_| "./models/e5-large-v2/model.onnx".to_string());
    let tokenizer_path = env::var("TOKENIZER_PATH")
        .unwrap_or_else(|_| "./models/e5-large-v2/tokenizer.json".to_string());
    let queue_url =
        env::var("QUEUE_URL").unwrap_or_else(|_| "http://localhost:3000/api/queue".to_string());

    // Load the embedding model. Load failure is not fatal: the server still
    // starts, /health reports model_loaded: false and embedding endpoints
    // return 500 until the node is restarted with valid model files.
    let model = match OnnxEmbeddingModel::new(version::MODEL_NAME, &model_path, &tokenizer_path)
        .await
    {
        Ok(model) => {
            tracing::info!(
                "{} model loaded successfully ({} dimensions, max sequence length {})",
                model.model_name(),
                model.dimension(),
                model.max_length()
            );
            Some(Arc::new(model))
        }
        Err(e) => {
            tracing::error!("Error loading model: {:#}", e);
            None
        }
    };

    let queue = QueueClient::new(&queue_url)?;
    tracing::info!("Queue forwarding target: {}", queue.queue_url());

    let state = AppState {
        model,
        queue: Arc::new(queue),
    };

    start_server(state, port)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
