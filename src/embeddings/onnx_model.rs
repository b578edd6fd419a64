// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Embedding Model Wrapper
//!
//! This module provides a wrapper around ONNX Runtime for running the
//! e5-large-v2 sentence transformer model.
//!
//! Features:
//! - ONNX model loading from disk
//! - WordPiece tokenization with truncation
//! - Attention-mask-weighted mean pooling over token embeddings
//! - L2 normalization of the pooled vector
//! - 1024-dimensional output vectors

use anyhow::{Context, Result};
use ndarray::{Array2, Axis};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::Tokenizer;
use tracing::info;

/// Output dimension of e5-large-v2
const E5_DIMENSION: usize = 1024;

/// Maximum sequence length of e5-large-v2
const E5_MAX_LENGTH: usize = 512;

/// Scales `vector` so its Euclidean norm equals 1.
///
/// A zero vector is left untouched.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

/// ONNX-based embedding model (e5-large-v2)
///
/// This struct wraps ONNX Runtime to provide 1024-dimensional, L2-normalized
/// embeddings. The model uses a sentence transformer architecture with:
/// - BERT-based tokenizer
/// - Mean pooling over token embeddings
/// - L2 normalization applied after pooling
///
/// # Thread Safety
/// All fields are wrapped in Arc for cheap cloning and thread-safe sharing.
/// The model is loaded once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    /// ONNX Runtime session (wrapped in Arc<Mutex> for thread-safe shared access)
    session: Arc<Mutex<Session>>,

    /// BERT tokenizer
    tokenizer: Arc<Tokenizer>,

    /// Model name (e.g., "e5-large-v2")
    model_name: String,

    /// Output dimension (1024 for e5-large-v2)
    dimension: usize,

    /// Maximum sequence length (512 for e5-large-v2)
    max_length: usize,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .field("max_length", &self.max_length)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbeddingModel {
    /// Creates a new ONNX embedding model from disk paths
    ///
    /// # Arguments
    /// - `model_path`: Path to ONNX model file (model.onnx)
    /// - `tokenizer_path`: Path to tokenizer JSON file (tokenizer.json)
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found or invalid
    /// - Tokenizer file not found or invalid
    /// - ONNX Runtime initialization fails
    /// - Model doesn't output 1024 dimensions
    pub async fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        tokenizer_path: P,
    ) -> Result<Self> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        // Validate paths exist
        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load ONNX model from {}",
                model_path.display()
            ))?;

        info!("ONNX embedding model loaded from {}", model_path.display());

        // Load tokenizer
        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: E5_MAX_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;

        let model = Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name,
            dimension: E5_DIMENSION,
            max_length: E5_MAX_LENGTH,
        };

        // Validate output dimensions by running a test inference
        let probe = model.run_inference("validation test")?;
        if probe.len() != E5_DIMENSION {
            anyhow::bail!(
                "Model outputs unexpected dimension: {} (expected {})",
                probe.len(),
                E5_DIMENSION
            );
        }

        info!(
            "Validated {} output: {} dimensions",
            model.model_name, model.dimension
        );

        Ok(model)
    }

    /// Generates an L2-normalized embedding for a single text
    ///
    /// # Implementation
    /// 1. Tokenize input (truncation to max_length)
    /// 2. Run ONNX inference
    /// 3. Attention-mask-weighted mean pooling over the sequence dimension
    /// 4. L2 normalization
    ///
    /// # Example
    /// ```ignore
    /// let embedding = model.embed("query: hello world").await?;
    /// assert_eq!(embedding.len(), 1024);
    /// ```
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.run_inference(text)?;

        if embedding.len() != self.dimension {
            anyhow::bail!(
                "Unexpected embedding dimension: {} (expected {})",
                embedding.len(),
                self.dimension
            );
        }

        Ok(embedding)
    }

    /// Tokenize, run the session and pool the output for one text.
    fn run_inference(&self, text: &str) -> Result<Vec<f32>> {
        // Tokenize input
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> = vec![0i64; input_ids.len()];

        // Keep a copy of attention_mask for mean pooling
        let attention_mask_for_pooling = attention_mask.clone();

        // Create input tensors
        let input_ids_array = Array2::from_shape_vec((1, input_ids.len()), input_ids)
            .context("Failed to create input_ids array")?;
        let attention_mask_array =
            Array2::from_shape_vec((1, attention_mask.len()), attention_mask)
                .context("Failed to create attention_mask array")?;
        let token_type_ids_array =
            Array2::from_shape_vec((1, token_type_ids.len()), token_type_ids)
                .context("Failed to create token_type_ids array")?;

        // Run inference (ort 2.0 API) - lock session for thread-safe access
        let mut session_guard = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Model session lock poisoned"))?;
        let outputs = session_guard.run(ort::inputs![
            "input_ids" => Value::from_array(input_ids_array)?,
            "attention_mask" => Value::from_array(attention_mask_array)?,
            "token_type_ids" => Value::from_array(token_type_ids_array)?
        ])?;

        // Extract output tensor (ort 2.0 API)
        // Use index [0] instead of name since different models may have different output names
        let output_array = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        // Model outputs token-level embeddings: [batch, seq_len, hidden_dim]
        let output_shape = output_array.shape();
        if output_shape.len() != 3 {
            anyhow::bail!(
                "Model outputs unexpected shape: {:?} (expected [batch, seq_len, hidden_dim])",
                output_shape
            );
        }

        let batch_0 = output_array.index_axis(Axis(0), 0); // [seq_len, hidden_dim]
        let seq_len = batch_0.shape()[0];
        let hidden_dim = batch_0.shape()[1];

        // Mean pooling: average over sequence length dimension,
        // weighted by attention mask to ignore padding tokens
        let mut pooled = vec![0.0f32; hidden_dim];
        let mut sum_mask = 0.0f32;

        for i in 0..seq_len {
            let mask_value = attention_mask_for_pooling[i] as f32;
            sum_mask += mask_value;
            for j in 0..hidden_dim {
                pooled[j] += batch_0[[i, j]] * mask_value;
            }
        }

        // Normalize by sum of mask (number of non-padding tokens)
        for val in &mut pooled {
            *val /= sum_mask.max(1e-9);
        }

        // e5 embeddings are consumed with cosine similarity; normalize here
        // so callers always see unit-length vectors
        l2_normalize(&mut pooled);

        Ok(pooled)
    }

    /// Returns the output dimension of this model
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the maximum input sequence length
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Returns the model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}
