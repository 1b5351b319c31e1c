//! Round-robin provider pool.

use gateway_core::LLMProvider;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Interchangeable providers registered under one model name.
///
/// A pool is created from its first provider, so it is never empty.
/// Selection increments a shared counter and indexes into the provider list;
/// the increment is a single atomic operation, so concurrent callers never
/// lose or duplicate a slot.
pub struct ProviderPool {
    providers: Vec<Arc<dyn LLMProvider>>,
    next: AtomicU64,
}

impl ProviderPool {
    /// Create a pool holding one provider
    #[must_use]
    pub fn new(first: Arc<dyn LLMProvider>) -> Self {
        Self {
            providers: vec![first],
            next: AtomicU64::new(0),
        }
    }

    /// Append a provider. Startup only; requires exclusive access.
    pub fn register(&mut self, provider: Arc<dyn LLMProvider>) {
        self.providers.push(provider);
    }

    /// Next provider in registration order, wrapping around
    #[must_use]
    pub fn next(&self) -> Arc<dyn LLMProvider> {
        let ticket = self.next.fetch_add(1, Ordering::Relaxed);
        let index = (ticket % self.providers.len() as u64) as usize;
        Arc::clone(&self.providers[index])
    }

    /// Number of providers
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the pool holds no providers; never true after construction
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Providers in registration order
    #[must_use]
    pub fn providers(&self) -> &[Arc<dyn LLMProvider>] {
        &self.providers
    }
}

impl std::fmt::Debug for ProviderPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderPool")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("next", &self.next.load(Ordering::Relaxed))
            .finish()
    }
}
