//! Configuration files on disk feeding the provider factory

use crate::fixtures::*;
use crate::helpers::*;
use crate::mock_providers::*;
use gateway_config::load_config;
use gateway_providers::ProviderFactory;
use std::io::Write;

fn write_config(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[tokio::test]
async fn test_yaml_file_starts_gateway() {
    let openai = MockOpenAI::new().await;
    openai.mock_chat_completion("gpt-4o", "from-file").await;

    let file = write_config(
        &config_yaml(&[openai_entry("gpt-4o", &openai.api_base())], None),
        ".yaml",
    );
    let config = load_config(file.path()).await.expect("load");

    let gateway = TestGateway::start(&config, vars(&test_env())).await;
    let response = gateway.chat("gpt-4o", "hello").await;
    assert_eq!(response.status(), 200);
    assert_eq!(completion_text(response).await, "from-file");
}

#[tokio::test]
async fn test_json_and_toml_files_build_the_same_router() {
    let json = r#"{
        "model_list": [
            {"model_name": "gpt-4o", "provider": "openai", "api_key_env": "TEST_OPENAI_KEY"},
            {"model_name": "gpt-4o", "provider": "azure", "api_base": "https://res.openai.azure.com"},
            {"model_name": "claude", "provider": "bedrock", "region": "us-west-2"}
        ]
    }"#;
    let toml = r#"
[[model_list]]
model_name = "gpt-4o"
provider = "openai"
api_key_env = "TEST_OPENAI_KEY"

[[model_list]]
model_name = "gpt-4o"
provider = "azure"
api_base = "https://res.openai.azure.com"

[[model_list]]
model_name = "claude"
provider = "bedrock"
region = "us-west-2"
"#;

    let factory = || {
        let env = vars(&test_env());
        ProviderFactory::with_lookup(move |name| env.get(name).cloned())
    };

    for (contents, suffix) in [(json, ".json"), (toml, ".toml")] {
        let file = write_config(contents, suffix);
        let config = load_config(file.path()).await.expect("load");
        let router = factory().build_router(&config.model_list).expect("router");

        assert_eq!(router.model_names(), vec!["claude", "gpt-4o"]);
        assert_eq!(router.provider_count(), 3);
    }
}

#[tokio::test]
async fn test_entries_without_credentials_are_skipped() {
    let file = write_config(
        "model_list:\n  - model_name: claude\n    provider: bedrock\n    region: us-east-1\n  - model_name: gpt-4o\n    provider: openai\n",
        ".yml",
    );
    let config = load_config(file.path()).await.expect("load");

    let router = ProviderFactory::with_lookup(|_| None)
        .build_router(&config.model_list)
        .expect("openai entry registers");
    assert_eq!(router.model_names(), vec!["gpt-4o"]);
}

#[tokio::test]
async fn test_empty_model_list_rejected() {
    let file = write_config("model_list: []\n", ".yaml");
    assert!(load_config(file.path()).await.is_err());
}
