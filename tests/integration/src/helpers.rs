//! Test helper utilities for integration tests

use gateway_config::{ConfigFormat, GatewayConfig};
use gateway_providers::ProviderFactory;
use gateway_resilience::{AdmissionConfig, AdmissionGate};
use gateway_server::{AppState, Server, ServerConfig};
use reqwest::{Client, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Once;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Initialize tracing for tests when `TEST_LOG` is set
pub fn init_tracing() {
    TRACING.call_once(|| {
        if std::env::var("TEST_LOG").is_ok() {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();
        }
    });
}

/// Variables the provider factory sees instead of the process environment
pub fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// A running gateway bound to an ephemeral port
pub struct TestGateway {
    /// The server address
    pub addr: SocketAddr,
    /// HTTP client for making requests
    pub client: Client,
    /// Base URL for the server
    pub base_url: String,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<std::io::Result<()>>>,
}

impl TestGateway {
    /// Parse a YAML configuration and start a gateway from it
    pub async fn from_yaml(yaml: &str, env: HashMap<String, String>) -> Self {
        let config = GatewayConfig::parse(yaml, ConfigFormat::Yaml).expect("valid config");
        Self::start(&config, env).await
    }

    /// Build providers, router and gate from `config` and serve them
    pub async fn start(config: &GatewayConfig, env: HashMap<String, String>) -> Self {
        init_tracing();

        let factory = ProviderFactory::with_lookup(move |name| env.get(name).cloned());
        let router = factory
            .build_router(&config.model_list)
            .expect("at least one model registers");
        let gate = AdmissionGate::new(AdmissionConfig {
            requests_per_minute: config.rate_limit.requests_per_minute,
            burst: config.rate_limit.burst,
        });
        let state = AppState::builder()
            .router(router)
            .gate(gate)
            .build()
            .expect("state");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local addr");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let server = Server::new(
            ServerConfig::new().with_shutdown_timeout(Duration::from_secs(1)),
            state,
        );
        let handle = tokio::spawn(server.serve(listener, async move {
            let _ = shutdown_rx.await;
        }));

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create client");

        Self {
            addr,
            client,
            base_url: format!("http://{addr}"),
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Absolute URL for a path on this gateway
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a path
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }

    /// POST a JSON body to a path
    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// POST a single-message chat completion
    pub async fn chat(&self, model: &str, content: &str) -> Response {
        self.post_json("/v1/chat/completions", &crate::fixtures::chat_body(model, content))
            .await
    }

    /// Stop the server and wait for it to exit
    pub async fn shutdown(mut self) -> std::io::Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        match self.handle.take() {
            Some(handle) => handle.await.expect("server task"),
            None => Ok(()),
        }
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Read the completion text of the first choice
pub async fn completion_text(response: Response) -> String {
    let body: Value = response.json().await.expect("JSON body");
    body["choices"][0]["message"]["content"]
        .as_str()
        .expect("content")
        .to_string()
}
