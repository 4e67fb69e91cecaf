//! Turn loop driving a requester/assistant exchange.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Result, TriageError};
use crate::provider::{ChatModelClient, ToolDefinition};
use crate::stop::TerminationPredicate;
use crate::tools::ToolRegistry;
use crate::types::{
    ChatMessage, Conversation, Role, ToolInvocationRequest, ToolInvocationResult, Usage,
};

use super::events::ChatEvent;
use super::types::{AbortReason, ChatId, ChatResult, ChatSettings, ChatState};

/// Callback used for streaming chat events.
pub type ChatEventSink = Arc<dyn Fn(ChatEvent) + Send + Sync>;

/// Drives one conversation at a time between the requester (this process)
/// and a model-backed assistant.
///
/// Turns are strictly sequential: tool requests from one assistant reply run
/// to completion, in order, before the next model call is issued.
pub struct ConversationOrchestrator {
    client: Arc<dyn ChatModelClient>,
    registry: Arc<ToolRegistry>,
    predicate: Arc<dyn TerminationPredicate>,
    settings: ChatSettings,
    requester_name: Option<String>,
    assistant_name: Option<String>,
    event_sink: Option<ChatEventSink>,
}

impl ConversationOrchestrator {
    pub fn new(
        client: Arc<dyn ChatModelClient>,
        registry: Arc<ToolRegistry>,
        predicate: Arc<dyn TerminationPredicate>,
    ) -> Self {
        Self {
            client,
            registry,
            predicate,
            settings: ChatSettings::default(),
            requester_name: None,
            assistant_name: None,
            event_sink: None,
        }
    }

    pub fn with_settings(mut self, settings: ChatSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builder: participant names attached to requester and assistant messages.
    pub fn with_names(
        mut self,
        requester: impl Into<String>,
        assistant: impl Into<String>,
    ) -> Self {
        self.requester_name = Some(requester.into());
        self.assistant_name = Some(assistant.into());
        self
    }

    pub fn with_event_sink(mut self, sink: ChatEventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// Run a chat seeded with `prompt` until it completes, exhausts its turn
    /// budget, or `cancel` fires.
    ///
    /// Model-client failures are fatal and returned as `Err`. Tool failures
    /// are fed back to the assistant as error results. Cancellation drops any
    /// in-flight call and yields an `Aborted` result holding the partial
    /// conversation.
    pub async fn initiate(
        &self,
        prompt: impl Into<String>,
        cancel: &CancellationToken,
    ) -> Result<ChatResult> {
        let mut run = ChatRun {
            chat_id: Uuid::new_v4(),
            conversation: Conversation::new(),
            usage: Usage::default(),
            sink: self.event_sink.as_ref(),
        };
        run.set_state(ChatState::Idle);

        let tools: Vec<ToolDefinition> = self.registry.definitions_for(Role::Assistant);
        info!(
            chat_id = %run.chat_id,
            model = self.client.model_id(),
            max_turns = self.settings.max_turns,
            tools = tools.len(),
            "starting chat"
        );

        run.append(self.requester_message(prompt.into()));
        run.set_state(ChatState::Running);

        loop {
            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Ok(run.abort(AbortReason::Canceled));
                }
                response = self.client.complete(&run.conversation, &tools) => response?,
            };
            run.usage.merge(&response.usage);

            let tool_calls = response.tool_calls.clone();
            let mut assistant = ChatMessage::assistant(response.text, response.tool_calls);
            if let Some(ref name) = self.assistant_name {
                assistant = assistant.with_name(name.clone());
            }
            run.append(assistant);
            let turn = run.conversation.turns();
            debug!(
                chat_id = %run.chat_id,
                turn,
                tool_calls = tool_calls.len(),
                finish_reason = ?response.finish_reason,
                "assistant turn"
            );

            for call in &tool_calls {
                let result = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        return Ok(run.abort(AbortReason::Canceled));
                    }
                    result = self.execute_tool(call, &run) => result,
                };
                run.append(ChatMessage::tool_result(result));
            }

            let terminated = run
                .conversation
                .last_assistant()
                .is_some_and(|message| self.predicate.is_termination_message(message));
            if terminated {
                return Ok(run.complete());
            }

            if turn >= self.settings.max_turns {
                info!(chat_id = %run.chat_id, turn, "turn budget exhausted");
                return Ok(run.abort(AbortReason::MaxTurns));
            }

            if tool_calls.is_empty() {
                run.append(self.requester_message(self.settings.auto_reply.clone()));
            }
        }
    }

    fn requester_message(&self, text: String) -> ChatMessage {
        let message = ChatMessage::requester(text);
        match self.requester_name {
            Some(ref name) => message.with_name(name.clone()),
            None => message,
        }
    }

    /// Run one tool request, converting every failure into an error result.
    async fn execute_tool(
        &self,
        call: &ToolInvocationRequest,
        run: &ChatRun<'_>,
    ) -> ToolInvocationResult {
        run.emit(ChatEvent::ToolInvoked {
            request: call.clone(),
        });

        let outcome = match self.registry.get(&call.name) {
            Some(descriptor) if descriptor.caller() != Role::Assistant => {
                Err(TriageError::ToolNotCallable {
                    tool_name: call.name.clone(),
                    role: Role::Assistant.to_string(),
                })
            }
            _ => {
                self.registry
                    .invoke(call, Role::Requester, self.settings.tool_timeout)
                    .await
            }
        };

        match outcome {
            Ok(result) => result,
            Err(err) => {
                warn!(
                    chat_id = %run.chat_id,
                    tool = %call.name,
                    error = %err,
                    "tool invocation failed"
                );
                run.emit(ChatEvent::ToolFailed {
                    request: call.clone(),
                    error: err.to_string(),
                });
                ToolInvocationResult::error(call, &err)
            }
        }
    }
}

/// Mutable state of one in-progress chat.
struct ChatRun<'a> {
    chat_id: ChatId,
    conversation: Conversation,
    usage: Usage,
    sink: Option<&'a ChatEventSink>,
}

impl ChatRun<'_> {
    fn emit(&self, event: ChatEvent) {
        if let Some(sink) = self.sink {
            sink(event);
        }
    }

    fn set_state(&self, state: ChatState) {
        self.emit(ChatEvent::StateChanged { state });
    }

    fn append(&mut self, message: ChatMessage) {
        let stored = self.conversation.append(message);
        if let Some(sink) = self.sink {
            sink(ChatEvent::MessageAppended {
                message: stored.clone(),
            });
        }
    }

    fn complete(self) -> ChatResult {
        self.set_state(ChatState::Completed);
        info!(
            chat_id = %self.chat_id,
            turns = self.conversation.turns(),
            "chat completed"
        );
        let summary = self.conversation.last_assistant().and_then(|m| m.text());
        ChatResult {
            chat_id: self.chat_id,
            state: ChatState::Completed,
            abort_reason: None,
            summary,
            conversation: self.conversation,
            usage: self.usage,
        }
    }

    fn abort(self, reason: AbortReason) -> ChatResult {
        self.set_state(ChatState::Aborted);
        info!(
            chat_id = %self.chat_id,
            turns = self.conversation.turns(),
            %reason,
            "chat aborted"
        );
        ChatResult {
            chat_id: self.chat_id,
            state: ChatState::Aborted,
            abort_reason: Some(reason),
            summary: None,
            conversation: self.conversation,
            usage: self.usage,
        }
    }
}
