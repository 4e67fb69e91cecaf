//! Chat event stream types.

use serde::Serialize;

use crate::types::{ChatMessage, ToolInvocationRequest};

use super::types::ChatState;

/// Events emitted while a chat runs, in the order they happen.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    StateChanged { state: ChatState },
    MessageAppended { message: ChatMessage },
    ToolInvoked { request: ToolInvocationRequest },
    ToolFailed { request: ToolInvocationRequest, error: String },
}
