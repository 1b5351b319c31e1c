use async_trait::async_trait;
use gateway_core::{
    Choice, FinishReason, GatewayRequest, GatewayResponse, GatewayResult, LLMProvider,
    ProviderKind,
};
use std::sync::Arc;

/// Provider that answers with its own name
pub(crate) struct StubProvider {
    name: String,
}

impl StubProvider {
    pub(crate) fn arc(name: &str) -> Arc<dyn LLMProvider> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

#[async_trait]
impl LLMProvider for StubProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    async fn chat_completion(&self, request: &GatewayRequest) -> GatewayResult<GatewayResponse> {
        Ok(GatewayResponse::builder()
            .model(&request.model)
            .choice(Choice::assistant(0, self.name.clone(), FinishReason::Stop))
            .build())
    }
}
