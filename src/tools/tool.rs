//! Tool trait and closure-based tool wrapper.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use super::arguments::ToolArguments;
use super::types::ToolParameters;
use crate::error::TriageError;
use crate::types::Role;

/// Context available during tool execution.
#[derive(Debug, Clone)]
pub struct ToolExecutionContext {
    /// Id of the invocation request being served.
    pub tool_call_id: String,
    /// Role that executes the tool.
    pub executor: Role,
}

/// Core tool trait. Implement to expose a capability to the assistant.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model calls).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema parameters.
    fn parameters(&self) -> &ToolParameters;

    /// Execute the tool, producing the text fed back into the conversation.
    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<String, TriageError>;
}

type ToolHandler = dyn Fn(ToolArguments, ToolExecutionContext) -> BoxFuture<'static, Result<String, TriageError>>
    + Send
    + Sync;

/// Closure-based tool for quick tool creation.
pub struct FunctionTool {
    name: String,
    description: String,
    parameters: ToolParameters,
    handler: Arc<ToolHandler>,
}

impl FunctionTool {
    /// Create a tool from a closure.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: ToolParameters,
        handler: F,
    ) -> Self
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, TriageError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Arc::new(move |args, ctx| Box::pin(handler(args, ctx))),
        }
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<String, TriageError> {
        (self.handler)(args.clone(), ctx.clone()).await
    }
}

impl std::fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}
