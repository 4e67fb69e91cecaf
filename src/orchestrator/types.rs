//! Core run types for the conversation orchestrator.

use std::time::Duration;

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

use crate::config::{DEFAULT_MAX_TURNS, DEFAULT_TOOL_TIMEOUT};
use crate::types::{Conversation, Usage};

/// Identifier assigned to each chat, for log correlation.
pub type ChatId = Uuid;

/// Orchestrator lifecycle: `Idle -> Running -> {Completed, Aborted}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChatState {
    Idle,
    Running,
    Completed,
    Aborted,
}

/// Why a chat ended in [`ChatState::Aborted`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AbortReason {
    /// Turn budget exhausted without the termination predicate firing.
    MaxTurns,
    /// External cancellation (e.g. Ctrl-C).
    Canceled,
}

/// Knobs for a single chat.
#[derive(Debug, Clone, Builder)]
pub struct ChatSettings {
    /// Maximum number of assistant turns before aborting.
    #[builder(default = DEFAULT_MAX_TURNS)]
    pub max_turns: u32,
    /// Budget for each tool execution.
    #[builder(default = DEFAULT_TOOL_TIMEOUT)]
    pub tool_timeout: Duration,
    /// Text the requester sends back when the assistant neither finishes nor
    /// requests a tool.
    #[builder(default, into)]
    pub auto_reply: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Final outcome of a chat.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResult {
    pub chat_id: ChatId,
    pub state: ChatState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abort_reason: Option<AbortReason>,
    /// Content of the final assistant message; set only when completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub conversation: Conversation,
    pub usage: Usage,
}

impl ChatResult {
    pub fn is_completed(&self) -> bool {
        self.state == ChatState::Completed
    }

    /// Text of the last assistant message, whatever the end state.
    pub fn last_assistant_text(&self) -> Option<String> {
        self.conversation.last_assistant().and_then(|m| m.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_matches_config_defaults() {
        let settings = ChatSettings::default();
        assert_eq!(settings.max_turns, 7);
        assert_eq!(settings.tool_timeout, Duration::from_secs(60));
        assert_eq!(settings.auto_reply, "");
    }

    #[test]
    fn settings_builder_overrides() {
        let settings = ChatSettings::builder()
            .max_turns(2)
            .auto_reply("Continue.")
            .build();
        assert_eq!(settings.max_turns, 2);
        assert_eq!(settings.auto_reply, "Continue.");
    }
}
