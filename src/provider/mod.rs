//! Language-model provider trait and the OpenAI-compatible implementation.

pub mod http;
pub mod openai;

use async_trait::async_trait;

use crate::config::JournalistConfig;
use crate::error::JournalistError;
use crate::tools::ToolDefinition;
use crate::types::{AgentToolCall, FinishReason, GenerationSettings, ModelMessage, Usage};

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
    pub tools: Option<Vec<ToolDefinition>>,
}

/// Response from a provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub tool_calls: Vec<AgentToolCall>,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate a complete (non-streaming) reply.
    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, JournalistError>;
}

/// Create the provider described by `config`.
pub fn create_provider(config: &JournalistConfig) -> Result<Box<dyn ModelProvider>, JournalistError> {
    let api_key = config
        .openai_api_key()
        .ok_or_else(|| JournalistError::MissingCredential("OPENAI_API_KEY".into()))?;
    Ok(Box::new(openai::OpenAiProvider::new(
        config.model.clone(),
        api_key.to_string(),
        config.openai_base_url.clone(),
    )))
}
