//! Request bodies, upstream responses and configuration documents

use serde_json::{json, Value};

/// Single user message chat request
pub fn chat_body(model: &str, content: &str) -> Value {
    json!({
        "model": model,
        "messages": [{"role": "user", "content": content}]
    })
}

/// OpenAI-shaped chat completion
pub fn openai_chat_response(model: &str, content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 5, "completion_tokens": 3, "total_tokens": 8}
    })
}

/// OpenAI-shaped error body
pub fn openai_error_response(code: &str, message: &str) -> Value {
    json!({
        "error": {"message": message, "type": code, "code": code}
    })
}

/// OpenAI-shaped embeddings response
pub fn openai_embeddings_response(model: &str, vector: &[f32]) -> Value {
    json!({
        "object": "list",
        "model": model,
        "data": [{"object": "embedding", "index": 0, "embedding": vector}],
        "usage": {"prompt_tokens": 2, "total_tokens": 2}
    })
}

/// Model list entry for an OpenAI-compatible upstream
pub fn openai_entry(model: &str, api_base: &str) -> String {
    format!(
        "  - model_name: {model}\n    provider: openai\n    api_base: {api_base}\n    api_key_env: TEST_OPENAI_KEY\n"
    )
}

/// Model list entry for an Azure upstream
pub fn azure_entry(model: &str, api_base: &str, deployment: &str) -> String {
    format!(
        "  - model_name: {model}\n    provider: azure\n    api_base: {api_base}\n    api_key_env: TEST_AZURE_KEY\n    deployment_name: {deployment}\n"
    )
}

/// Model list entry for a Bedrock upstream
pub fn bedrock_entry(model: &str, endpoint: &str, model_id: &str) -> String {
    format!(
        "  - model_name: {model}\n    provider: bedrock\n    api_base: {endpoint}\n    deployment_name: {model_id}\n    region: us-east-1\n"
    )
}

/// Full configuration document with the given `model_list` entries
pub fn config_yaml(entries: &[String], requests_per_minute: Option<u32>) -> String {
    let mut yaml = String::from("server:\n  host: 127.0.0.1\n  port: 0\nmodel_list:\n");
    for entry in entries {
        yaml.push_str(entry);
    }
    if let Some(rpm) = requests_per_minute {
        yaml.push_str(&format!("rate_limit:\n  requests_per_minute: {rpm}\n  burst: 1\n"));
    }
    yaml
}

/// Variables consumed by the adapters built from these fixtures
pub fn test_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("TEST_OPENAI_KEY", "sk-openai-test"),
        ("TEST_AZURE_KEY", "azure-test-key"),
        ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
        ("AWS_SECRET_ACCESS_KEY", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"),
    ]
}
