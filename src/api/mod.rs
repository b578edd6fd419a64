// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod embed;
pub mod errors;
pub mod http_server;

pub use embed::{
    embed_passage_handler, embed_query_handler, index_handler, EmbedRequest, EmbedResponse,
    HealthResponse, IndexResponse,
};
pub use errors::{ApiError, ErrorResponse};
pub use http_server::{build_router, start_server, AppState};
