// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedRequest type shared by the POST /, /passage and /index endpoints

use crate::api::ApiError;
use serde::{Deserialize, Serialize};

/// Request body for the embedding endpoints
///
/// # Example
/// ```json
/// {
///   "text": "How tall is the Eiffel Tower?"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedRequest {
    /// Free-form text to embed
    pub text: String,
}

impl EmbedRequest {
    /// Validates the embed request
    ///
    /// # Validation Rules
    /// 1. Text cannot be empty
    /// 2. Text cannot be whitespace-only
    ///
    /// Rejected requests never reach the model.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.text.trim().is_empty() {
            return Err(ApiError::EmptyText);
        }
        Ok(())
    }
}
