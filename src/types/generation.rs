//! Completion-level enums.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Why the model stopped producing a reply.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
}

impl FinishReason {
    /// Parse the wire value used by chat-completion APIs.
    pub fn from_wire(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}
