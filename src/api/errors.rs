// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
}

/// Request-scoped error taxonomy for the embedding endpoints.
///
/// - `ModelUnavailable`: the model failed to load at startup (500)
/// - `EmptyText`: empty or whitespace-only input, rejected before any model
///   call (400)
/// - `InternalError`: unexpected processing failure, carries the underlying
///   message (500)
#[derive(Debug, Clone)]
pub enum ApiError {
    ModelUnavailable,
    EmptyText,
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let (error_type, message) = match self {
            ApiError::ModelUnavailable => {
                ("model_unavailable", "Model not loaded".to_string())
            }
            ApiError::EmptyText => ("empty_text", "Text cannot be empty".to_string()),
            ApiError::InternalError(msg) => {
                ("internal_error", format!("Error processing text: {}", msg))
            }
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ModelUnavailable => 500,
            ApiError::EmptyText => 400,
            ApiError::InternalError(_) => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ModelUnavailable => write!(f, "Model not loaded"),
            ApiError::EmptyText => write!(f, "Text cannot be empty"),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
