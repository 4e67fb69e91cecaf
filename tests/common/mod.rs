//! Shared test helpers and scripted chat client.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use ci_triage::error::TriageError;
use ci_triage::provider::{ChatModelClient, ProviderResponse, ToolDefinition};
use ci_triage::tools::{FunctionTool, Tool, ToolParameters};
use ci_triage::types::*;

/// One scripted step of the fake model.
pub enum Scripted {
    Reply(ProviderResponse),
    Fail(TriageError),
    /// Never resolves; used to exercise cancellation.
    Hang,
}

/// A chat client that plays back queued replies in order.
pub struct ScriptedClient {
    model_id: String,
    script: Mutex<Vec<Scripted>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<Vec<ChatMessage>>>,
    offered_tools: Mutex<Vec<Vec<String>>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            model_id: "scripted-model".to_string(),
            script: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            offered_tools: Mutex::new(Vec::new()),
        }
    }

    /// Queue a plain text reply.
    pub fn queue_text(&self, text: &str) -> &Self {
        self.script.lock().unwrap().push(Scripted::Reply(ProviderResponse {
            text: Some(text.to_string()),
            tool_calls: vec![],
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
            finish_reason: Some(FinishReason::Stop),
        }));
        self
    }

    /// Queue a reply that requests one tool and carries no text.
    pub fn queue_tool_call(&self, id: &str, name: &str, args: serde_json::Value) -> &Self {
        self.script.lock().unwrap().push(Scripted::Reply(ProviderResponse {
            text: None,
            tool_calls: vec![ToolInvocationRequest::new(id, name, args)],
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
                total_tokens: 15,
            },
            finish_reason: Some(FinishReason::ToolCalls),
        }));
        self
    }

    pub fn queue_error(&self, error: TriageError) -> &Self {
        self.script.lock().unwrap().push(Scripted::Fail(error));
        self
    }

    pub fn queue_hang(&self) -> &Self {
        self.script.lock().unwrap().push(Scripted::Hang);
        self
    }

    /// Number of `complete` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Conversation snapshot passed to each call.
    pub fn seen(&self) -> Vec<Vec<ChatMessage>> {
        self.seen.lock().unwrap().clone()
    }

    /// Tool names offered on each call.
    pub fn offered_tools(&self) -> Vec<Vec<String>> {
        self.offered_tools.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModelClient for ScriptedClient {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn complete(
        &self,
        conversation: &Conversation,
        tools: &[ToolDefinition],
    ) -> Result<ProviderResponse, TriageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push(conversation.messages().to_vec());
        self.offered_tools
            .lock()
            .unwrap()
            .push(tools.iter().map(|t| t.name.clone()).collect());

        let next = {
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                None
            } else {
                Some(script.remove(0))
            }
        };
        match next {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::Fail(error)) => Err(error),
            Some(Scripted::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Ok(ProviderResponse {
                text: Some("Still thinking.".to_string()),
                finish_reason: Some(FinishReason::Stop),
                ..Default::default()
            }),
        }
    }
}

/// A tool that sleeps before answering.
pub fn slow_tool(name: &str, delay: Duration) -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        name,
        "Sleeps, then answers",
        ToolParameters::empty(),
        move |_args, _ctx| async move {
            tokio::time::sleep(delay).await;
            Ok("done".to_string())
        },
    ))
}

/// A tool that always fails.
pub fn failing_tool(name: &str) -> Arc<dyn Tool> {
    let tool_name = name.to_string();
    Arc::new(FunctionTool::new(
        name,
        "Always fails",
        ToolParameters::empty(),
        move |_args, _ctx| {
            let tool_name = tool_name.clone();
            async move {
                Err(TriageError::ToolExecution {
                    tool_name,
                    message: "exploded".into(),
                })
            }
        },
    ))
}

pub const FINAL_ANSWER: &str = "The endpoints were not removed.\n\nPlausible Root Causes:\n\
1. Endpoint controller lag\n2. Stale readiness gates\n3. Kube-proxy sync delay";
