//! # Gateway Telemetry
//!
//! Observability for the LLM model gateway.
//!
//! This crate provides:
//! - Structured logging (pretty or JSON)
//! - Prometheus metrics for routed requests and admission rejections

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingError};
pub use metrics::{Metrics, MetricsConfig, MetricsError, RequestMetrics, RequestOutcome};
