//! Model name to provider pool mapping.

use crate::pool::ProviderPool;
use gateway_core::LLMProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Routes a model name to the next provider of its pool.
///
/// Built with `&mut self` registration during startup, then shared behind an
/// `Arc` and only read. Lookups are exact and case-sensitive; there is no
/// aliasing, wildcarding or fallback model.
#[derive(Debug, Default)]
pub struct ModelRouter {
    pools: HashMap<String, ProviderPool>,
}

impl ModelRouter {
    /// Create an empty router
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider to the pool for `model`, creating the pool on first use
    pub fn register(&mut self, model: impl Into<String>, provider: Arc<dyn LLMProvider>) {
        let model = model.into();
        debug!(model = %model, provider = %provider.name(), "Registering provider");

        match self.pools.get_mut(&model) {
            Some(pool) => pool.register(provider),
            None => {
                self.pools.insert(model, ProviderPool::new(provider));
            }
        }
    }

    /// Select the next provider for `model`
    #[must_use]
    pub fn get(&self, model: &str) -> Option<Arc<dyn LLMProvider>> {
        self.pools
            .get(model)
            .filter(|pool| !pool.is_empty())
            .map(ProviderPool::next)
    }

    /// Pool registered for `model`
    #[must_use]
    pub fn pool(&self, model: &str) -> Option<&ProviderPool> {
        self.pools.get(model)
    }

    /// Number of distinct model names
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Whether no model is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Registered model names, sorted
    #[must_use]
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Total providers across all pools
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.pools.values().map(ProviderPool::len).sum()
    }
}
