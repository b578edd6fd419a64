//! Best-effort forwarding of computed embeddings to the vector queue service.
//!
//! The queue service ingests `{embeddings, metadata}` records and indexes
//! them asynchronously. Delivery here is fire-and-forget: the `/index`
//! handler logs failures and never surfaces them to its own client.

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Metadata attached to every forwarded embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueMetadata {
    /// Freshly generated record id
    pub id: String,
    /// Original source text
    pub chunk: String,
    /// Fixed label identifying this service as the producer
    pub source: String,
}

/// Request body accepted by the queue service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuePayload {
    pub embeddings: Vec<f32>,
    pub metadata: QueueMetadata,
}

impl QueuePayload {
    /// Builds a payload with a fresh UUID and the fixed "embedder" source label.
    pub fn new(embedding: Vec<f32>, text: &str) -> Self {
        Self {
            embeddings: embedding,
            metadata: QueueMetadata {
                id: Uuid::new_v4().to_string(),
                chunk: text.to_string(),
                source: "embedder".to_string(),
            },
        }
    }
}

/// HTTP client for the external vector queue service.
pub struct QueueClient {
    client: Client,
    queue_url: String,
}

impl QueueClient {
    pub fn new(queue_url: &str) -> Result<Self> {
        let _parsed_url =
            reqwest::Url::parse(queue_url).map_err(|e| anyhow!("Invalid queue URL: {}", e))?;

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            queue_url: queue_url.to_string(),
        })
    }

    /// Returns the configured queue endpoint URL.
    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    /// POSTs one embedding record to the queue service.
    ///
    /// Non-success responses are errors; the caller decides whether they
    /// matter. No retry, no backoff.
    pub async fn forward(&self, embedding: Vec<f32>, text: &str) -> Result<()> {
        let payload = QueuePayload::new(embedding, text);

        let response = self
            .client
            .post(&self.queue_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("Queue forward failed ({}): {}", status, error_text));
        }

        Ok(())
    }
}
