//! Request middleware.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::{error::ApiError, state::AppState};

/// Admission check, applied before the body is read.
///
/// Rejections are 429 with a `Retry-After` header in whole seconds.
pub async fn admission_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(err) = state.gateway.admit() {
        let retry_after = state.gateway.gate().retry_after();
        debug!(
            path = %request.uri().path(),
            retry_after_ms = retry_after.as_millis(),
            "Request rejected by admission gate"
        );

        let mut response = ApiError::from(err).into_response();
        let seconds = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(seconds.max(1)));
        return response;
    }

    next.run(request).await
}
