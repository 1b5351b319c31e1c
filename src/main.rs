//! # LLM Model Gateway
//!
//! OpenAI-compatible gateway that routes chat completions to pooled provider
//! backends (OpenAI, Azure OpenAI, AWS Bedrock) by model name.
//!
//! ## Usage
//!
//! ```bash
//! # Start with ./config.yaml
//! llm-model-gateway
//!
//! # Start with a custom config file and listen address
//! llm-model-gateway --config /etc/gateway/config.toml --addr 127.0.0.1:8080
//!
//! # Start with environment overrides
//! GATEWAY_PORT=9000 GATEWAY_RATE_LIMIT_RPM=120 llm-model-gateway
//! ```

use anyhow::Context;
use clap::Parser;
use gateway_config::{load_config, GatewayConfig};
use gateway_providers::build_router;
use gateway_resilience::{AdmissionConfig, AdmissionGate};
use gateway_server::{AppState, Server, ServerConfig};
use gateway_telemetry::{init_logging, LoggingConfig, Metrics, MetricsConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{error, info};

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "llm-model-gateway", version, about)]
struct Cli {
    /// Configuration file (.yaml, .yml, .json or .toml)
    #[arg(short, long, env = "GATEWAY_CONFIG", default_value = "config.yaml")]
    config: PathBuf,

    /// Listen address, overriding `server.host` and `server.port`
    #[arg(long)]
    addr: Option<SocketAddr>,
}

/// Application entry point
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            let _ = init_logging(&LoggingConfig::new());
            error!(path = %cli.config.display(), error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&LoggingConfig::from(&config.logging)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "Starting LLM model gateway"
    );

    if let Err(e) = run(config, cli.addr).await {
        error!(error = %format!("{e:#}"), "Gateway failed");
        std::process::exit(1);
    }
}

/// Main application logic
async fn run(config: GatewayConfig, addr: Option<SocketAddr>) -> anyhow::Result<()> {
    let router = build_router(&config.model_list).context("failed to build model router")?;

    let gate = AdmissionGate::new(AdmissionConfig {
        requests_per_minute: config.rate_limit.requests_per_minute,
        burst: config.rate_limit.burst,
    });

    let metrics = Metrics::new(&MetricsConfig::default())?;

    let state = AppState::builder()
        .router(router)
        .gate(gate)
        .metrics(metrics)
        .build()?;

    let server_config = match addr {
        Some(addr) => ServerConfig::new()
            .with_host(match addr {
                SocketAddr::V4(v4) => v4.ip().to_string(),
                SocketAddr::V6(v6) => format!("[{}]", v6.ip()),
            })
            .with_port(addr.port()),
        None => ServerConfig::new()
            .with_host(&config.server.host)
            .with_port(config.server.port),
    }
    .with_shutdown_timeout(config.server.shutdown_timeout);

    Server::new(server_config, state)
        .run()
        .await
        .context("server error")?;

    info!("Gateway stopped");
    Ok(())
}
