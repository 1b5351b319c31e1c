//! `model_list` entries.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Binds a model name to one provider backend
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ModelConfig {
    /// Routing key clients send as `model`
    #[validate(length(min = 1, message = "model_name is required"))]
    pub model_name: String,

    /// Provider kind (`openai`, `azure`, `bedrock`); unknown kinds are
    /// skipped when providers are built
    #[validate(length(min = 1, message = "provider is required"))]
    pub provider: String,

    /// Backend base URL or endpoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub api_base: Option<String>,

    /// Name of the environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Azure API version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Azure deployment, or Bedrock model id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,

    /// AWS region for Bedrock
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Per-call backend timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

impl ModelConfig {
    /// Minimal entry, mostly for tests and programmatic setup
    #[must_use]
    pub fn new(model_name: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            provider: provider.into(),
            api_base: None,
            api_key_env: None,
            api_version: None,
            deployment_name: None,
            region: None,
            timeout: default_timeout(),
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the key variable name
    #[must_use]
    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = Some(var.into());
        self
    }

    /// Set the deployment name
    #[must_use]
    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment_name = Some(deployment.into());
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Look up the API key in the variable named by `api_key_env`. An unset
    /// variable, or no variable name at all, yields an empty key.
    pub fn api_key_from<F>(&self, lookup: F) -> SecretString
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = self
            .api_key_env
            .as_deref()
            .and_then(lookup)
            .unwrap_or_default();
        SecretString::new(value)
    }

    /// Deployment name, falling back to the model name
    #[must_use]
    pub fn deployment(&self) -> &str {
        self.deployment_name.as_deref().unwrap_or(&self.model_name)
    }

    /// Label used in logs and metrics
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.provider, self.deployment())
    }
}
