//! Convenience re-exports for common use.

pub use crate::config::TriageConfig;
pub use crate::error::{Result, TriageError};
pub use crate::orchestrator::{
    AbortReason, ChatEvent, ChatResult, ChatSettings, ChatState, ConversationOrchestrator,
};
pub use crate::provider::{ChatModelClient, ProviderResponse, ToolDefinition};
pub use crate::stop::{PhraseTermination, TerminationPredicate};
pub use crate::tools::{FunctionTool, Tool, ToolArguments, ToolParameters, ToolRegistry};
pub use crate::types::{
    ChatMessage, ContentPart, Conversation, Role, ToolInvocationRequest, ToolInvocationResult,
    Usage,
};
