//! Admission control over real HTTP

use crate::fixtures::*;
use crate::helpers::*;
use crate::mock_providers::*;
use serde_json::Value;

#[tokio::test]
async fn test_one_per_minute_admits_then_rejects() {
    let openai = MockOpenAI::new().await;
    openai.mock_chat_completion("gpt-4o", "ok").await;

    let yaml = config_yaml(&[openai_entry("gpt-4o", &openai.api_base())], Some(1));
    let gateway = TestGateway::from_yaml(&yaml, vars(&test_env())).await;

    assert_eq!(gateway.chat("gpt-4o", "first").await.status(), 200);

    let rejected = gateway.chat("gpt-4o", "second").await;
    assert_eq!(rejected.status(), 429);
    assert!(rejected.headers().contains_key("retry-after"));
    let body: Value = rejected.json().await.unwrap();
    assert_eq!(body["error"], "rate limit exceeded");

    assert_eq!(openai.calls().await, 1);
}

#[tokio::test]
async fn test_rejections_counted_and_probes_exempt() {
    let openai = MockOpenAI::new().await;
    openai.mock_chat_completion("gpt-4o", "ok").await;

    let yaml = config_yaml(&[openai_entry("gpt-4o", &openai.api_base())], Some(1));
    let gateway = TestGateway::from_yaml(&yaml, vars(&test_env())).await;

    assert_eq!(gateway.chat("gpt-4o", "first").await.status(), 200);
    for _ in 0..3 {
        assert_eq!(gateway.chat("gpt-4o", "again").await.status(), 429);
    }

    assert_eq!(gateway.get("/healthz").await.status(), 200);
    let metrics = gateway.get("/metrics").await;
    assert_eq!(metrics.status(), 200);
    assert!(metrics
        .text()
        .await
        .unwrap()
        .contains("gateway_admission_rejections_total 3"));
}

#[tokio::test]
async fn test_unlimited_without_rate_limit_section() {
    let openai = MockOpenAI::new().await;
    openai.mock_chat_completion("gpt-4o", "ok").await;

    let yaml = config_yaml(&[openai_entry("gpt-4o", &openai.api_base())], None);
    let gateway = TestGateway::from_yaml(&yaml, vars(&test_env())).await;

    for _ in 0..20 {
        assert_eq!(gateway.chat("gpt-4o", "hello").await.status(), 200);
    }
}
