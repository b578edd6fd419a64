use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::embed::{
    embed_passage_handler, embed_query_handler, index_handler, service_info, HealthResponse,
};
use crate::api::errors::ApiError;
use crate::embeddings::OnnxEmbeddingModel;
use crate::queue::QueueClient;

/// Shared per-request state.
///
/// The model handle is `None` when loading failed at startup; the server
/// still runs so `/health` can report the condition.
#[derive(Clone)]
pub struct AppState {
    pub model: Option<Arc<OnnxEmbeddingModel>>,
    pub queue: Arc<QueueClient>,
}

/// Builds the service router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Embedding endpoints
        .route("/", post(embed_query_handler).get(root_handler))
        .route("/passage", post(embed_passage_handler))
        .route("/index", post(index_handler))
        // Health check
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Embedding API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::response::Json(HealthResponse::new(state.model.is_some()))
}

async fn root_handler() -> impl IntoResponse {
    axum::response::Json(service_info())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let error_response = self.to_response();

        (status, axum::response::Json(error_response)).into_response()
    }
}
