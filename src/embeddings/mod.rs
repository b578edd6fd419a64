// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod onnx_model;
pub mod preprocess;

pub use onnx_model::{l2_normalize, OnnxEmbeddingModel};
pub use preprocess::{preprocess_text, TaskType};
