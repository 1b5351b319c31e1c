//! Prometheus metrics.

use prometheus::{
    HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;
use tracing::warn;

/// Metrics configuration
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Metric name prefix
    pub namespace: String,
    /// Latency histogram buckets, in seconds
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            namespace: "gateway".to_string(),
            duration_buckets: vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0],
        }
    }
}

/// How a routed request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The provider answered
    Success,
    /// The provider returned an error
    Error,
    /// The provider timed out
    Timeout,
}

impl RequestOutcome {
    /// Label value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Timeout => "timeout",
        }
    }
}

/// One routed request, as recorded
#[derive(Debug, Clone)]
pub struct RequestMetrics<'a> {
    /// Requested model name
    pub model: &'a str,
    /// Provider that handled the request
    pub provider: &'a str,
    /// Outcome
    pub outcome: RequestOutcome,
    /// Time spent in the provider call
    pub latency: Duration,
}

/// Gateway metrics, each instance with its own registry
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    admission_rejections_total: IntCounter,
    model_not_found_total: IntCounter,
    request_duration_seconds: HistogramVec,
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish_non_exhaustive()
    }
}

impl Metrics {
    /// Create and register all metrics
    ///
    /// # Errors
    /// Returns error if a metric definition is invalid
    pub fn new(config: &MetricsConfig) -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("requests_total", "Requests routed to a provider")
                .namespace(config.namespace.as_str()),
            &["model", "provider", "outcome"],
        )?;
        let admission_rejections_total = IntCounter::with_opts(
            Opts::new(
                "admission_rejections_total",
                "Requests refused by the admission gate",
            )
            .namespace(config.namespace.as_str()),
        )?;
        let model_not_found_total = IntCounter::with_opts(
            Opts::new(
                "model_not_found_total",
                "Requests naming an unregistered model",
            )
            .namespace(config.namespace.as_str()),
        )?;
        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new("request_duration_seconds", "Provider call latency")
                .namespace(config.namespace.as_str())
                .buckets(config.duration_buckets.clone()),
            &["model", "provider"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(admission_rejections_total.clone()))?;
        registry.register(Box::new(model_not_found_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            admission_rejections_total,
            model_not_found_total,
            request_duration_seconds,
        })
    }

    /// Record a routed request
    pub fn record_request(&self, request: &RequestMetrics<'_>) {
        self.requests_total
            .with_label_values(&[request.model, request.provider, request.outcome.as_str()])
            .inc();
        self.request_duration_seconds
            .with_label_values(&[request.model, request.provider])
            .observe(request.latency.as_secs_f64());
    }

    /// Record an admission rejection
    pub fn record_admission_rejection(&self) {
        self.admission_rejections_total.inc();
    }

    /// Record a lookup for an unregistered model
    pub fn record_model_not_found(&self) {
        self.model_not_found_total.inc();
    }

    /// Admission rejections so far
    #[must_use]
    pub fn admission_rejections(&self) -> u64 {
        self.admission_rejections_total.get()
    }

    /// Requests recorded for a label combination
    #[must_use]
    pub fn request_count(&self, model: &str, provider: &str, outcome: RequestOutcome) -> u64 {
        self.requests_total
            .with_label_values(&[model, provider, outcome.as_str()])
            .get()
    }

    /// Prometheus text exposition of all metrics
    #[must_use]
    pub fn gather(&self) -> String {
        TextEncoder::new()
            .encode_to_string(&self.registry.gather())
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to encode metrics");
                String::new()
            })
    }
}

/// Metrics setup error
#[derive(Debug, thiserror::Error)]
#[error("metrics error: {0}")]
pub struct MetricsError(#[from] prometheus::Error);
