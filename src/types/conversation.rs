//! Append-only conversation history.

use serde::Serialize;

use super::message::{ChatMessage, Role};

/// Ordered, append-only message history plus the assistant turn counter.
///
/// Only the orchestrator mutates a conversation; callers get read access.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    turns: u32,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, stamping its position. Returns the stored message.
    pub fn append(&mut self, mut message: ChatMessage) -> &ChatMessage {
        message.position = self.messages.len();
        if message.role == Role::Assistant {
            self.turns += 1;
        }
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// All messages in order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of assistant replies appended so far.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Most recent assistant message.
    pub fn last_assistant(&self) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role == Role::Assistant)
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
