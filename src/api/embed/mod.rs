// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding endpoint types and handlers

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{embed_passage_handler, embed_query_handler, index_handler};
pub use request::EmbedRequest;
pub use response::{service_info, EmbedResponse, HealthResponse, IndexResponse};
