//! Chat model client trait and implementations.

pub mod format;
pub mod http;

#[cfg(feature = "openai")]
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::TriageConfig;
use crate::error::TriageError;
use crate::types::{Conversation, FinishReason, ToolInvocationRequest, Usage};

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// One assistant reply as returned by a provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    /// Rendered text; `None` when the model returned null content.
    pub text: Option<String>,
    pub tool_calls: Vec<ToolInvocationRequest>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Adapter to a remote chat-completion endpoint.
///
/// Each call is independent: no caching and no internal retry.
#[async_trait]
pub trait ChatModelClient: Send + Sync {
    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &str;

    /// The model ID this client serves.
    fn model_id(&self) -> &str;

    /// Produce the next assistant reply for `conversation`, offering `tools`.
    async fn complete(
        &self,
        conversation: &Conversation,
        tools: &[ToolDefinition],
    ) -> Result<ProviderResponse, TriageError>;
}

/// Create the configured chat client.
///
/// Fails with [`TriageError::Configuration`] when no credential is set.
#[allow(unused_variables)]
pub fn create_client(
    config: &TriageConfig,
    system_message: Option<String>,
) -> Result<Arc<dyn ChatModelClient>, TriageError> {
    let api_key = config.require_api_key()?;
    #[cfg(feature = "openai")]
    {
        let client = openai::OpenAiChatClient::new(
            config.model.clone(),
            api_key.to_string(),
            Some(config.base_url.clone()),
        )
        .with_system_message(system_message);
        Ok(Arc::new(client))
    }
    #[cfg(not(feature = "openai"))]
    {
        Err(TriageError::Configuration(
            "no chat provider enabled via feature flags".into(),
        ))
    }
}
