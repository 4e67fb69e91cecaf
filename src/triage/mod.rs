//! The CI-failure triage agent profile.
//!
//! Wires the `parse_failure` tool, the root-cause termination phrase, and the
//! fixed instructions into a ready-to-run [`ConversationOrchestrator`].

use std::sync::Arc;

use crate::config::TriageConfig;
use crate::error::Result;
use crate::orchestrator::{ChatSettings, ConversationOrchestrator};
use crate::provider::ChatModelClient;
use crate::stop::PhraseTermination;
use crate::tools::builtin::parse_failure_tool;
use crate::tools::ToolRegistry;
use crate::types::Role;

pub const ASSISTANT_NAME: &str = "CIFailureAgent";
pub const REQUESTER_NAME: &str = "UserProxy";

/// Instructions given to the assistant ahead of every request.
pub const SYSTEM_MESSAGE: &str = "You are a helpful AI assistant tasked with analyzing \
OpenShift CI job failures. You have access to a tool named `parse_failure` to retrieve \
failure details. Always call the `parse_failure` **tool** first when asked about a CI job \
failure. After retrieving details, analyze them and suggest **3 plausible root causes**. \
Conclude your response by listing the root causes under the heading 'Plausible Root Causes:'.";

/// Task prompt that opens the conversation.
pub const PROMPT: &str = "An OpenShift CI job has failed. Please analyze the failure \
details by using the `parse_failure` tool, and then suggest **3 plausible root causes**. \
Format your final response by listing them under the heading 'Plausible Root Causes:'.";

/// Registry holding `parse_failure`, requested by the assistant and executed
/// by the requester.
pub fn build_registry() -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(parse_failure_tool(), Role::Assistant, Role::Requester)?;
    Ok(registry)
}

/// Chat settings derived from configuration.
pub fn chat_settings(config: &TriageConfig) -> ChatSettings {
    ChatSettings::builder()
        .max_turns(config.max_turns)
        .tool_timeout(config.tool_timeout)
        .build()
}

/// Assemble the triage orchestrator around an already-constructed client.
///
/// The client is expected to carry [`SYSTEM_MESSAGE`].
pub fn build_orchestrator(
    client: Arc<dyn ChatModelClient>,
    config: &TriageConfig,
) -> Result<ConversationOrchestrator> {
    let registry = build_registry()?;
    Ok(
        ConversationOrchestrator::new(
            client,
            Arc::new(registry),
            Arc::new(PhraseTermination::default()),
        )
        .with_settings(chat_settings(config))
        .with_names(REQUESTER_NAME, ASSISTANT_NAME),
    )
}
