//! Message types exchanged between conversation participants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Conversation participant role.
///
/// `Requester` issues the task and executes tools on behalf of the assistant,
/// `Assistant` is backed by the remote model, and `Tool` authors tool results.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Requester,
    Assistant,
    Tool,
}

/// A single message in a conversation. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Zero-based position in the owning conversation.
    pub position: usize,
    pub role: Role,
    pub content: Vec<ContentPart>,
    /// Tool name for `Tool` messages, participant name otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn with_content(role: Role, content: Vec<ContentPart>) -> Self {
        Self {
            position: 0,
            role,
            content,
            name: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a requester message.
    pub fn requester(text: impl Into<String>) -> Self {
        Self::with_content(Role::Requester, vec![ContentPart::Text { text: text.into() }])
    }

    /// Create an assistant message from optional text and tool requests.
    pub fn assistant(text: Option<String>, tool_calls: Vec<ToolInvocationRequest>) -> Self {
        let mut content = Vec::with_capacity(tool_calls.len() + 1);
        if let Some(text) = text {
            content.push(ContentPart::Text { text });
        }
        content.extend(tool_calls.into_iter().map(ContentPart::ToolCall));
        Self::with_content(Role::Assistant, content)
    }

    /// Create a tool result message attributed to the tool that produced it.
    pub fn tool_result(result: ToolInvocationResult) -> Self {
        let name = result.tool_name.clone();
        let mut message = Self::with_content(Role::Tool, vec![ContentPart::ToolResult(result)]);
        message.name = Some(name);
        message
    }

    /// Builder: set the participant name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Concatenated text parts, or `None` when the message carries no text.
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .content
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.concat())
        }
    }

    /// Tool invocation requests carried by this message.
    pub fn tool_calls(&self) -> Vec<&ToolInvocationRequest> {
        self.content
            .iter()
            .filter_map(|part| match part {
                ContentPart::ToolCall(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    /// Tool result carried by this message, if any.
    pub fn tool_result_part(&self) -> Option<&ToolInvocationResult> {
        self.content.iter().find_map(|part| match part {
            ContentPart::ToolResult(result) => Some(result),
            _ => None,
        })
    }
}

/// A single part of message content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ToolCall(ToolInvocationRequest),
    ToolResult(ToolInvocationResult),
}

/// A tool invocation requested by the assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolInvocationRequest {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

impl ToolInvocationRequest {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Text produced by executing (or failing to execute) a tool request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolInvocationResult {
    /// Id of the originating [`ToolInvocationRequest`].
    pub tool_call_id: String,
    pub tool_name: String,
    pub content: String,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolInvocationResult {
    /// Successful result for `request`.
    pub fn success(request: &ToolInvocationRequest, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: request.id.clone(),
            tool_name: request.name.clone(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Error result for `request`, rendered the way the assistant will read it.
    pub fn error(request: &ToolInvocationRequest, error: impl std::fmt::Display) -> Self {
        Self {
            tool_call_id: request.id.clone(),
            tool_name: request.name.clone(),
            content: format!("Error: {error}"),
            is_error: true,
        }
    }
}
