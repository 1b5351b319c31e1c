//! Building providers and the model router from configuration.

use crate::azure::{AzureConfig, AzureOpenAIProvider};
use crate::bedrock::{BedrockConfig, BedrockProvider};
use crate::openai::{OpenAIConfig, OpenAIProvider};
use crate::sigv4::AwsCredentials;
use gateway_config::ModelConfig;
use gateway_core::{GatewayError, LLMProvider, ProviderKind};
use gateway_routing::ModelRouter;
use std::sync::Arc;
use tracing::{info, warn};

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Creates provider adapters from `model_list` entries.
///
/// Credentials and AWS settings are read through a variable lookup, the
/// process environment by default.
pub struct ProviderFactory {
    lookup: Lookup,
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::from_env()
    }
}

impl std::fmt::Debug for ProviderFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderFactory").finish_non_exhaustive()
    }
}

impl ProviderFactory {
    /// Factory reading the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_lookup(|var| std::env::var(var).ok())
    }

    /// Factory reading variables through `lookup`
    #[must_use]
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
        }
    }

    fn var(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.is_empty())
    }

    /// Build the adapter for one entry. `index` is the entry's position in
    /// `model_list` and keeps provider names unique.
    ///
    /// # Errors
    /// Returns a configuration error for an unknown provider kind or missing
    /// settings, or an internal error if the HTTP client cannot be created
    pub fn build(
        &self,
        entry: &ModelConfig,
        index: usize,
    ) -> Result<Arc<dyn LLMProvider>, GatewayError> {
        let kind: ProviderKind = entry.provider.parse()?;
        let name = format!("{}#{index}", entry.label());

        let provider: Arc<dyn LLMProvider> = match kind {
            ProviderKind::OpenAI => {
                let mut config = OpenAIConfig::new(name, entry.api_key_from(|v| self.var(v)))
                    .with_timeout(entry.timeout);
                if let Some(api_base) = &entry.api_base {
                    config = config.with_api_base(api_base);
                }
                Arc::new(OpenAIProvider::new(config)?)
            }
            ProviderKind::Azure => {
                let api_base = entry.api_base.as_deref().ok_or_else(|| {
                    GatewayError::configuration("api_base is required for azure entries")
                })?;
                let mut config = AzureConfig::new(
                    name,
                    api_base,
                    entry.deployment(),
                    entry.api_key_from(|v| self.var(v)),
                )
                .with_timeout(entry.timeout);
                if let Some(version) = &entry.api_version {
                    config = config.with_api_version(version);
                }
                Arc::new(AzureOpenAIProvider::new(config)?)
            }
            ProviderKind::Bedrock => {
                let region = entry
                    .region
                    .clone()
                    .or_else(|| self.var("AWS_REGION"))
                    .or_else(|| self.var("AWS_DEFAULT_REGION"))
                    .ok_or_else(|| {
                        GatewayError::configuration(
                            "no AWS region: set region on the entry or AWS_REGION",
                        )
                    })?;
                let credentials = AwsCredentials::from_lookup(|v| self.var(v)).ok_or_else(|| {
                    GatewayError::configuration(
                        "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set for bedrock entries",
                    )
                })?;

                let mut config = BedrockConfig::new(name, entry.deployment(), region, credentials)
                    .with_timeout(entry.timeout);
                if let Some(endpoint) = entry
                    .api_base
                    .clone()
                    .or_else(|| self.var("AWS_ENDPOINT_URL"))
                {
                    config = config.with_endpoint_url(endpoint);
                }
                Arc::new(BedrockProvider::new(config)?)
            }
        };

        Ok(provider)
    }

    /// Build a router from `model_list`, in order.
    ///
    /// Entries with an unknown provider kind, or whose adapter fails to
    /// build, are logged and skipped.
    ///
    /// # Errors
    /// Returns a configuration error if no entry could be registered
    pub fn build_router(&self, entries: &[ModelConfig]) -> Result<ModelRouter, GatewayError> {
        let mut router = ModelRouter::new();

        for (index, entry) in entries.iter().enumerate() {
            match self.build(entry, index) {
                Ok(provider) => {
                    info!(
                        model = %entry.model_name,
                        provider = %provider.name(),
                        kind = %provider.kind(),
                        "Registered provider"
                    );
                    router.register(entry.model_name.clone(), provider);
                }
                Err(e) => {
                    warn!(
                        model = %entry.model_name,
                        provider = %entry.provider,
                        error = %e,
                        "Skipping model entry"
                    );
                }
            }
        }

        if router.is_empty() {
            return Err(GatewayError::configuration("no models registered"));
        }

        info!(
            models = router.len(),
            providers = router.provider_count(),
            "Model router ready"
        );
        Ok(router)
    }
}

/// Build a router from `model_list` using the process environment
///
/// # Errors
/// Returns a configuration error if no entry could be registered
pub fn build_router(entries: &[ModelConfig]) -> Result<ModelRouter, GatewayError> {
    ProviderFactory::from_env().build_router(entries)
}
