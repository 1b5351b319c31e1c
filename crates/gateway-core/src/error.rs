//! Error types for the gateway.
//!
//! Every failure on the routing path is expressed as a [`GatewayError`]. The
//! HTTP layer converts it into a status code and a JSON error body; nothing
//! below the server crate decides how an error is presented to a caller.

use crate::provider::ProviderKind;

/// Result alias used across the gateway crates
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Unified gateway error
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// The admission gate rejected the request
    #[error("rate limit exceeded")]
    RateLimited,

    /// The request body failed to parse or validate
    #[error("{message}")]
    Validation {
        /// Human-readable description
        message: String,
        /// Offending field, if known
        field: Option<String>,
    },

    /// No provider pool is registered for the requested model
    #[error("model not found: {model}")]
    ModelNotFound {
        /// Requested model name
        model: String,
    },

    /// The selected backend returned an error or was unreachable
    #[error("provider '{provider}' failed: {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Upstream error message
        message: String,
        /// Upstream HTTP status, if the backend answered
        status: Option<u16>,
    },

    /// The selected backend did not answer within its timeout
    #[error("provider '{provider}' timed out")]
    Timeout {
        /// Provider name
        provider: String,
    },

    /// The provider variant does not support the requested operation
    #[error("{operation} is not implemented for {provider_kind} providers")]
    NotImplemented {
        /// Operation name (e.g. "embeddings")
        operation: &'static str,
        /// Provider variant
        provider_kind: ProviderKind,
    },

    /// Invalid or unusable configuration
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the problem
        message: String,
    },

    /// Unexpected internal failure
    #[error("internal error: {message}")]
    Internal {
        /// Description of the problem
        message: String,
    },
}

impl GatewayError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.map(String::from),
        }
    }

    /// Create a model-not-found error
    pub fn model_not_found(model: impl Into<String>) -> Self {
        Self::ModelNotFound {
            model: model.into(),
        }
    }

    /// Create a provider error
    pub fn provider(
        provider: impl Into<String>,
        message: impl Into<String>,
        status: Option<u16>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            status,
        }
    }

    /// Create a timeout error
    pub fn timeout(provider: impl Into<String>) -> Self {
        Self::Timeout {
            provider: provider.into(),
        }
    }

    /// Create a not-implemented error
    #[must_use]
    pub fn not_implemented(operation: &'static str, provider_kind: ProviderKind) -> Self {
        Self::NotImplemented {
            operation,
            provider_kind,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::RateLimited => 429,
            Self::Validation { .. } | Self::ModelNotFound { .. } => 400,
            Self::Provider { .. } | Self::Configuration { .. } | Self::Internal { .. } => 500,
            Self::NotImplemented { .. } => 501,
            Self::Timeout { .. } => 504,
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::validation(format!("invalid JSON: {err}"), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GatewayError::RateLimited.status_code(), 429);
        assert_eq!(GatewayError::validation("bad", Some("model")).status_code(), 400);
        assert_eq!(GatewayError::model_not_found("ghost").status_code(), 400);
        assert_eq!(GatewayError::provider("p1", "boom", Some(503)).status_code(), 500);
        assert_eq!(GatewayError::timeout("p1").status_code(), 504);
        assert_eq!(
            GatewayError::not_implemented("embeddings", ProviderKind::Azure).status_code(),
            501
        );
    }

    #[test]
    fn test_not_implemented_names_operation_and_kind() {
        let err = GatewayError::not_implemented("embeddings", ProviderKind::Bedrock);
        assert_eq!(err.to_string(), "embeddings is not implemented for bedrock providers");
    }

    #[test]
    fn test_model_not_found_message() {
        let err = GatewayError::model_not_found("ghost");
        assert_eq!(err.to_string(), "model not found: ghost");
    }
}
