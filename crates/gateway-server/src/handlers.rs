//! HTTP request handlers for the gateway API.

use axum::{
    extract::{OriginalUri, State},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    Json,
};
use gateway_core::{EmbeddingRequest, EmbeddingResponse, GatewayRequest, GatewayResponse, ModelsResponse};
use tracing::{debug, instrument};

use crate::{
    error::ApiError,
    extractors::{JsonBody, RequestId},
    state::AppState,
};

/// Unknown path
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, format!("No route for {method} {}", uri.path()))
}

/// Known path, unsupported method
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {method} not allowed for {}", uri.path()),
    )
}

/// Liveness probe
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Metrics endpoint (Prometheus format)
pub async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.gateway.metrics().gather(),
    )
}

/// List models endpoint (OpenAI compatible)
#[instrument(skip(state))]
pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse::new(state.gateway.models()))
}

/// Chat completion endpoint (OpenAI compatible)
#[instrument(skip(state, request_id, body), fields(request_id = %request_id, model = %body.model))]
pub async fn chat_completion(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    JsonBody(body): JsonBody<GatewayRequest>,
) -> Result<Json<GatewayResponse>, ApiError> {
    debug!(messages = body.messages.len(), "Processing chat completion request");

    let response = state.gateway.chat_completion(&body).await?;
    Ok(Json(response))
}

/// Embeddings endpoint (OpenAI compatible)
#[instrument(skip(state, request_id, body), fields(request_id = %request_id, model = %body.model))]
pub async fn embeddings(
    State(state): State<AppState>,
    RequestId(request_id): RequestId,
    JsonBody(body): JsonBody<EmbeddingRequest>,
) -> Result<Json<EmbeddingResponse>, ApiError> {
    debug!(inputs = body.input.texts().len(), "Processing embeddings request");

    let response = state.gateway.embeddings(&body).await?;
    Ok(Json(response))
}
