//! HTTP plumbing shared by the adapters.

use gateway_core::GatewayError;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// Build the client an adapter owns for its lifetime
pub(crate) fn build_client(timeout: Duration) -> Result<Client, GatewayError> {
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(32)
        .build()
        .map_err(|e| GatewayError::internal(format!("failed to create HTTP client: {e}")))
}

/// Map a transport failure, keeping timeouts distinct
pub(crate) fn send_error(provider: &str, err: &reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        warn!(provider = %provider, "Backend request timed out");
        GatewayError::timeout(provider)
    } else {
        GatewayError::provider(provider, format!("request failed: {err}"), None)
    }
}

/// Read the body of a response, converting non-2xx statuses into errors
pub(crate) async fn read_body(provider: &str, response: Response) -> Result<Vec<u8>, GatewayError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| send_error(provider, &e))?;

    if !status.is_success() {
        let message = upstream_message(&bytes);
        warn!(
            provider = %provider,
            status = status.as_u16(),
            error = %message,
            "Backend returned an error"
        );
        return Err(GatewayError::provider(
            provider,
            format!("upstream returned {status}: {message}"),
            Some(status.as_u16()),
        ));
    }

    Ok(bytes.to_vec())
}

/// Read and decode a JSON response body
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: &str,
    response: Response,
) -> Result<T, GatewayError> {
    let bytes = read_body(provider, response).await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        GatewayError::provider(provider, format!("failed to parse response: {e}"), None)
    })
}

/// Error envelopes used by OpenAI-compatible and AWS backends
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UpstreamError {
    Nested { error: UpstreamErrorBody },
    Flat {
        #[serde(alias = "Message")]
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    message: String,
}

/// Best-effort message extraction from an error body
fn upstream_message(body: &[u8]) -> String {
    match serde_json::from_slice::<UpstreamError>(body) {
        Ok(UpstreamError::Nested { error }) => error.message,
        Ok(UpstreamError::Flat { message }) => message,
        Err(_) => {
            let text = String::from_utf8_lossy(body);
            let trimmed = text.trim();
            if trimmed.is_empty() {
                "empty response body".to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}
