//! Shared application state.

use gateway_core::GatewayError;
use gateway_resilience::AdmissionGate;
use gateway_routing::ModelRouter;
use gateway_telemetry::{Metrics, MetricsConfig};
use std::sync::Arc;

use crate::gateway::Gateway;

/// State handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    /// Request orchestrator
    pub gateway: Arc<Gateway>,
}

impl AppState {
    /// Create a new state builder
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::default()
    }

    /// Wrap an existing gateway
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}

/// Builder for [`AppState`]
#[derive(Debug, Default)]
pub struct AppStateBuilder {
    router: Option<ModelRouter>,
    gate: Option<AdmissionGate>,
    metrics: Option<Metrics>,
}

impl AppStateBuilder {
    /// Set the model router
    #[must_use]
    pub fn router(mut self, router: ModelRouter) -> Self {
        self.router = Some(router);
        self
    }

    /// Set the admission gate; unlimited when not set
    #[must_use]
    pub fn gate(mut self, gate: AdmissionGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Set the metrics; a fresh registry when not set
    #[must_use]
    pub fn metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the state
    ///
    /// # Errors
    /// Returns an internal error if default metrics cannot be registered
    pub fn build(self) -> Result<AppState, GatewayError> {
        let metrics = match self.metrics {
            Some(metrics) => metrics,
            None => Metrics::new(&MetricsConfig::default())
                .map_err(|e| GatewayError::internal(e.to_string()))?,
        };

        Ok(AppState::new(Gateway::new(
            self.router.unwrap_or_default(),
            self.gate.unwrap_or_default(),
            metrics,
        )))
    }
}
