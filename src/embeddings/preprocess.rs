// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Text preprocessing for e5 models
//!
//! e5 models were trained with task-specific prefixes and perform best when
//! queries and passages are marked as such before encoding.

/// How the embedded text will be used.
///
/// e5 distinguishes search queries from indexed documents; `Raw` skips
/// prefixing entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    Query,
    Passage,
    Raw,
}

/// Prepends the e5 task prefix to `text`.
///
/// Trims surrounding whitespace first. Empty (or whitespace-only) input is
/// returned unchanged, without a prefix.
///
/// # Example
/// ```
/// use embedder_node::embeddings::{preprocess_text, TaskType};
///
/// assert_eq!(preprocess_text("hello", TaskType::Query), "query: hello");
/// assert_eq!(preprocess_text("hello", TaskType::Passage), "passage: hello");
/// assert_eq!(preprocess_text("", TaskType::Query), "");
/// ```
pub fn preprocess_text(text: &str, task: TaskType) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    match task {
        TaskType::Query => format!("query: {}", text),
        TaskType::Passage => format!("passage: {}", text),
        TaskType::Raw => text.to_string(),
    }
}
