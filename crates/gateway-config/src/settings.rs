//! Top-level configuration sections.

use crate::error::ConfigError;
use crate::model::ModelConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use validator::Validate;

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GatewayConfig {
    /// HTTP listener
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerSettings,

    /// Log output
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Model name to provider bindings; order is registration order
    #[validate(length(min = 1, message = "model_list must contain at least one entry"), nested)]
    pub model_list: Vec<ModelConfig>,

    /// Admission gate
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl GatewayConfig {
    /// Apply `GATEWAY_*` overrides from the process environment
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidOverride` if a numeric variable does not parse
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidOverride` if a numeric variable does not parse
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("GATEWAY_HOST") {
            debug!(host = %host, "Overriding server host");
            self.server.host = host;
        }

        if let Some(port) = lookup("GATEWAY_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidOverride {
                var: "GATEWAY_PORT",
                value: port.clone(),
            })?;
            debug!(port = self.server.port, "Overriding server port");
        }

        if let Some(level) = lookup("GATEWAY_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(rpm) = lookup("GATEWAY_RATE_LIMIT_RPM") {
            let parsed = rpm.parse().map_err(|_| ConfigError::InvalidOverride {
                var: "GATEWAY_RATE_LIMIT_RPM",
                value: rpm.clone(),
            })?;
            self.rate_limit.requests_per_minute = Some(parsed);
        }

        Ok(())
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerSettings {
    /// Bind host
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Grace period for in-flight requests on shutdown
    #[serde(default = "default_shutdown_timeout", with = "humantime_serde")]
    pub shutdown_timeout: Duration,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `gateway_server=debug,info`
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Admission gate settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Sustained rate; absent or zero means unlimited
    #[serde(default)]
    pub requests_per_minute: Option<u32>,

    /// Bucket capacity; defaults to `requests_per_minute`
    #[serde(default)]
    pub burst: Option<u32>,
}
