//! Request orchestration: admission, validation, routing, provider call.
//!
//! The HTTP layer calls [`Gateway::admit`] before the body is parsed, then
//! hands the parsed request to [`Gateway::chat_completion`] or
//! [`Gateway::embeddings`]. Provider responses are returned unchanged; there
//! are no retries and no fallback to another pool member.

use gateway_core::{
    EmbeddingRequest, EmbeddingResponse, GatewayError, GatewayRequest, GatewayResponse,
    GatewayResult, LLMProvider, ModelObject,
};
use gateway_resilience::AdmissionGate;
use gateway_routing::ModelRouter;
use gateway_telemetry::{Metrics, RequestMetrics, RequestOutcome};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Value reported as `owned_by` in the model list
const MODEL_OWNER: &str = "llm-model-gateway";

/// Routes validated requests to provider pools
#[derive(Debug)]
pub struct Gateway {
    router: ModelRouter,
    gate: AdmissionGate,
    metrics: Metrics,
}

impl Gateway {
    /// Create a gateway over a populated router
    pub fn new(router: ModelRouter, gate: AdmissionGate, metrics: Metrics) -> Self {
        Self {
            router,
            gate,
            metrics,
        }
    }

    /// Model router
    pub fn router(&self) -> &ModelRouter {
        &self.router
    }

    /// Admission gate
    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// Metrics
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Take one admission token
    ///
    /// # Errors
    /// Returns `RateLimited` when the gate is empty
    pub fn admit(&self) -> GatewayResult<()> {
        self.gate.check().map_err(|e| {
            self.metrics.record_admission_rejection();
            e
        })
    }

    /// Validate, route and execute a chat completion
    ///
    /// # Errors
    /// Returns a validation error for a malformed request, `ModelNotFound`
    /// for an unregistered model, or the provider's error
    pub async fn chat_completion(&self, request: &GatewayRequest) -> GatewayResult<GatewayResponse> {
        request.validate()?;
        let provider = self.select(&request.model)?;

        let started = Instant::now();
        let result = provider.chat_completion(request).await;
        self.record(&request.model, provider.as_ref(), &result, started.elapsed());

        result
    }

    /// Validate, route and execute an embeddings request
    ///
    /// # Errors
    /// Same as [`chat_completion`](Self::chat_completion); variants without
    /// embeddings support return `NotImplemented`
    pub async fn embeddings(&self, request: &EmbeddingRequest) -> GatewayResult<EmbeddingResponse> {
        request.validate()?;
        let provider = self.select(&request.model)?;

        let started = Instant::now();
        let result = provider.embeddings(request).await;
        self.record(&request.model, provider.as_ref(), &result, started.elapsed());

        result
    }

    /// Registered model names, sorted
    pub fn models(&self) -> Vec<ModelObject> {
        self.router
            .model_names()
            .into_iter()
            .map(|name| ModelObject::new(name, MODEL_OWNER))
            .collect()
    }

    fn select(&self, model: &str) -> GatewayResult<Arc<dyn LLMProvider>> {
        self.router.get(model).ok_or_else(|| {
            self.metrics.record_model_not_found();
            debug!(model = %model, "No provider pool for model");
            GatewayError::model_not_found(model)
        })
    }

    fn record<T>(
        &self,
        model: &str,
        provider: &dyn LLMProvider,
        result: &GatewayResult<T>,
        latency: Duration,
    ) {
        let outcome = match result {
            Ok(_) => RequestOutcome::Success,
            Err(GatewayError::Timeout { .. }) => RequestOutcome::Timeout,
            Err(_) => RequestOutcome::Error,
        };

        self.metrics.record_request(&RequestMetrics {
            model,
            provider: provider.name(),
            outcome,
            latency,
        });

        match result {
            Ok(_) => info!(
                model = %model,
                provider = %provider.name(),
                duration_ms = latency.as_millis(),
                "Request completed"
            ),
            Err(e) => warn!(
                model = %model,
                provider = %provider.name(),
                duration_ms = latency.as_millis(),
                error = %e,
                "Provider call failed"
            ),
        }
    }
}
