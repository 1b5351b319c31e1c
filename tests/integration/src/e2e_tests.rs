//! End-to-end request flows through the real server and provider adapters

use crate::fixtures::*;
use crate::helpers::*;
use crate::mock_providers::*;
use serde_json::{json, Value};
use std::time::Duration;

#[tokio::test]
async fn test_pooled_backends_alternate() {
    let openai = MockOpenAI::new().await;
    openai.mock_chat_completion("gpt-4o", "from-openai").await;
    let azure = MockAzure::new().await;
    azure.mock_chat_completion("gpt4o-prod", "from-azure").await;

    let yaml = config_yaml(
        &[
            openai_entry("gpt-4o", &openai.api_base()),
            azure_entry("gpt-4o", &azure.api_base(), "gpt4o-prod"),
        ],
        None,
    );
    let gateway = TestGateway::from_yaml(&yaml, vars(&test_env())).await;

    let mut seen = Vec::new();
    for _ in 0..10 {
        let response = gateway.chat("gpt-4o", "hello").await;
        assert_eq!(response.status(), 200);
        seen.push(completion_text(response).await);
    }

    let expected: Vec<&str> = ["from-openai", "from-azure"]
        .iter()
        .copied()
        .cycle()
        .take(10)
        .collect();
    assert_eq!(seen, expected);
    assert_eq!(openai.calls().await, 5);
}

#[tokio::test]
async fn test_openai_response_passes_through() {
    let openai = MockOpenAI::new().await;
    openai.mock_chat_completion("gpt-4o-2024-08-06", "Hello!").await;

    let yaml = config_yaml(&[openai_entry("gpt-4o", &openai.api_base())], None);
    let gateway = TestGateway::from_yaml(&yaml, vars(&test_env())).await;

    let response = gateway.chat("gpt-4o", "hi").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], "chatcmpl-test");
    assert_eq!(body["model"], "gpt-4o-2024-08-06");
    assert_eq!(body["usage"]["total_tokens"], 8);
    assert_eq!(body["choices"][0]["finish_reason"], "stop");
}

#[tokio::test]
async fn test_bedrock_signed_invocation() {
    let bedrock = MockBedrock::new().await;
    bedrock.mock_invoke("anthropic.claude-v2", "Bonjour").await;

    let yaml = config_yaml(
        &[bedrock_entry("claude", &bedrock.endpoint(), "anthropic.claude-v2")],
        None,
    );
    let gateway = TestGateway::from_yaml(&yaml, vars(&test_env())).await;

    let response = gateway.chat("claude", "Say hello in French").await;
    assert_eq!(response.status(), 200);
    assert_eq!(completion_text(response).await, "Bonjour");

    let requests = bedrock.server.received_requests().await.unwrap();
    let payload: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(payload["prompt"], "User: Say hello in French\nAssistant: ");
}

#[tokio::test]
async fn test_unknown_model_never_reaches_upstream() {
    let openai = MockOpenAI::new().await;
    openai.mock_chat_completion("gpt-4o", "unused").await;

    let yaml = config_yaml(&[openai_entry("gpt-4o", &openai.api_base())], None);
    let gateway = TestGateway::from_yaml(&yaml, vars(&test_env())).await;

    let response = gateway.chat("ghost", "hello").await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "model not found: ghost"}));
    assert_eq!(openai.calls().await, 0);
}

#[tokio::test]
async fn test_upstream_error_is_internal_error() {
    let openai = MockOpenAI::new().await;
    openai.mock_error(503, "engine overloaded").await;

    let yaml = config_yaml(&[openai_entry("gpt-4o", &openai.api_base())], None);
    let gateway = TestGateway::from_yaml(&yaml, vars(&test_env())).await;

    let response = gateway.chat("gpt-4o", "hello").await;
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("engine overloaded"));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let openai = MockOpenAI::new().await;
    openai
        .mock_chat_completion_delayed("gpt-4o", "too late", Duration::from_secs(2))
        .await;

    let entry = format!(
        "  - model_name: gpt-4o\n    provider: openai\n    api_base: {}\n    timeout: 200ms\n",
        openai.api_base()
    );
    let gateway = TestGateway::from_yaml(&config_yaml(&[entry], None), vars(&test_env())).await;

    let response = gateway.chat("gpt-4o", "hello").await;
    assert_eq!(response.status(), 504);
}

#[tokio::test]
async fn test_embeddings_routed() {
    let openai = MockOpenAI::new().await;
    openai.mock_embeddings("text-embedding-3-small", &[0.25, -0.5]).await;

    let yaml = config_yaml(&[openai_entry("embed", &openai.api_base())], None);
    let gateway = TestGateway::from_yaml(&yaml, vars(&test_env())).await;

    let response = gateway
        .post_json("/v1/embeddings", &json!({"model": "embed", "input": ["hello"]}))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"][0]["embedding"], json!([0.25, -0.5]));
}

#[tokio::test]
async fn test_models_health_and_metrics() {
    let openai = MockOpenAI::new().await;
    openai.mock_chat_completion("gpt-4o", "ok").await;
    let bedrock = MockBedrock::new().await;

    let yaml = config_yaml(
        &[
            openai_entry("gpt-4o", &openai.api_base()),
            bedrock_entry("claude", &bedrock.endpoint(), "anthropic.claude-v2"),
            "  - model_name: gemini\n    provider: vertex\n".to_string(),
        ],
        None,
    );
    let gateway = TestGateway::from_yaml(&yaml, vars(&test_env())).await;

    let health = gateway.get("/healthz").await;
    assert_eq!(health.status(), 200);
    assert_eq!(health.text().await.unwrap(), "ok");

    let models: Value = gateway.get("/v1/models").await.json().await.unwrap();
    let ids: Vec<&str> = models["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["claude", "gpt-4o"]);

    assert_eq!(gateway.chat("gpt-4o", "hello").await.status(), 200);

    let metrics = gateway.get("/metrics").await.text().await.unwrap();
    assert!(metrics.contains(
        r#"gateway_requests_total{model="gpt-4o",outcome="success",provider="openai/gpt-4o#0"} 1"#
    ));
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let openai = MockOpenAI::new().await;
    openai.mock_chat_completion("gpt-4o", "ok").await;

    let yaml = config_yaml(&[openai_entry("gpt-4o", &openai.api_base())], None);
    let gateway = TestGateway::from_yaml(&yaml, vars(&test_env())).await;
    assert_eq!(gateway.chat("gpt-4o", "hello").await.status(), 200);

    let url = gateway.url("/healthz");
    gateway.shutdown().await.expect("clean shutdown");

    let after = reqwest::Client::new().get(url).send().await;
    assert!(after.is_err());
}
