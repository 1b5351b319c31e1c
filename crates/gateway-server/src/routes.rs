//! Route definitions for the gateway API.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{handlers, middleware, state::AppState};

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check).fallback(handlers::method_not_allowed))
        .route("/healthz", get(handlers::health_check).fallback(handlers::method_not_allowed))
        // Metrics endpoint
        .route("/metrics", get(handlers::metrics_endpoint).fallback(handlers::method_not_allowed))
        // OpenAI-compatible endpoints
        .nest("/v1", openai_routes(state.clone()))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

/// OpenAI-compatible API routes, behind the admission gate
fn openai_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/chat/completions",
            post(handlers::chat_completion).fallback(handlers::method_not_allowed),
        )
        .route(
            "/embeddings",
            post(handlers::embeddings).fallback(handlers::method_not_allowed),
        )
        .route("/models", get(handlers::list_models).fallback(handlers::method_not_allowed))
        .route_layer(from_fn_with_state(state, middleware::admission_middleware))
}
