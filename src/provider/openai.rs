//! OpenAI Chat Completions client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::TriageError;
use crate::types::*;

use super::format::{arguments_from_string, arguments_to_string};
use super::http::{bearer_headers, shared_client, status_to_error};
use super::{ChatModelClient, ProviderResponse, ToolDefinition};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiChatClient {
    model: String,
    api_key: String,
    base_url: String,
    system_message: Option<String>,
    client: reqwest::Client,
}

impl OpenAiChatClient {
    pub fn new(model: impl Into<String>, api_key: String, base_url: Option<String>) -> Self {
        Self {
            model: model.into(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            system_message: None,
            client: shared_client().clone(),
        }
    }

    /// Builder: system message prepended to every request.
    pub fn with_system_message(mut self, system_message: Option<String>) -> Self {
        self.system_message = system_message;
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub(crate) fn build_request_body(
        &self,
        conversation: &Conversation,
        tools: &[ToolDefinition],
    ) -> serde_json::Value {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        if let Some(ref system) = self.system_message {
            messages.push(serde_json::json!({ "role": "system", "content": system }));
        }
        messages.extend(conversation.messages().iter().map(message_to_openai));

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        if !tools.is_empty() {
            let tool_defs: Vec<serde_json::Value> = tools
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "type": "function",
                        "function": {
                            "name": t.name,
                            "description": t.description,
                            "parameters": t.parameters,
                        }
                    })
                })
                .collect();
            body["tools"] = tool_defs.into();
        }

        body
    }
}

#[async_trait]
impl ChatModelClient for OpenAiChatClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        conversation: &Conversation,
        tools: &[ToolDefinition],
    ) -> Result<ProviderResponse, TriageError> {
        let body = self.build_request_body(conversation, tools);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            model = %self.model,
            messages = conversation.len(),
            tools = tools.len(),
            "OpenAI complete"
        );

        let resp = self
            .client
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(TriageError::TransientNetwork)?;

        let status = resp.status().as_u16();
        let body_text = resp.text().await.map_err(TriageError::TransientNetwork)?;
        if !(200..300).contains(&status) {
            return Err(status_to_error(status, &body_text));
        }

        let data: OpenAiChatResponse = serde_json::from_str(&body_text)
            .map_err(|e| TriageError::model(status, format!("invalid response body: {e}")))?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| TriageError::model(status, "No choices in OpenAI response"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| {
                ToolInvocationRequest::new(
                    tc.id,
                    tc.function.name,
                    arguments_from_string(tc.function.arguments),
                )
            })
            .collect();

        Ok(ProviderResponse {
            text: choice.message.content,
            tool_calls,
            usage: data
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
            finish_reason: choice.finish_reason.as_deref().and_then(FinishReason::from_wire),
        })
    }
}

fn message_to_openai(msg: &ChatMessage) -> serde_json::Value {
    match msg.role {
        Role::Requester => serde_json::json!({
            "role": "user",
            "content": msg.text().unwrap_or_default(),
        }),
        Role::Assistant => {
            let content = msg
                .text()
                .map(serde_json::Value::String)
                .unwrap_or(serde_json::Value::Null);
            let tool_calls: Vec<serde_json::Value> = msg
                .tool_calls()
                .iter()
                .map(|tc| {
                    serde_json::json!({
                        "id": tc.id,
                        "type": "function",
                        "function": {
                            "name": tc.name,
                            "arguments": arguments_to_string(&tc.arguments),
                        }
                    })
                })
                .collect();
            if tool_calls.is_empty() {
                serde_json::json!({ "role": "assistant", "content": content })
            } else {
                serde_json::json!({
                    "role": "assistant",
                    "content": content,
                    "tool_calls": tool_calls,
                })
            }
        }
        Role::Tool => match msg.tool_result_part() {
            Some(result) => serde_json::json!({
                "role": "tool",
                "tool_call_id": result.tool_call_id,
                "content": result.content,
            }),
            None => serde_json::json!({
                "role": "tool",
                "content": msg.text().unwrap_or_default(),
            }),
        },
    }
}

// OpenAI API response types (internal)

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAiToolCall>>,
}

#[derive(Deserialize)]
struct OpenAiToolCall {
    id: String,
    function: OpenAiFunction,
}

#[derive(Deserialize)]
struct OpenAiFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
