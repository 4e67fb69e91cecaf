//! Tool registry and invoker.
//!
//! Tools are registered once, before a conversation starts, together with the
//! role allowed to request them (`caller`) and the role that runs them
//! (`executor`). Entries are immutable after registration, so a registry can
//! be shared behind an `Arc` by any number of conversations.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolExecutionContext};
use crate::error::{Result, TriageError};
use crate::provider::ToolDefinition;
use crate::types::{Role, ToolInvocationRequest, ToolInvocationResult};

/// A registered tool plus its role binding.
#[derive(Clone)]
pub struct ToolDescriptor {
    tool: Arc<dyn Tool>,
    caller: Role,
    executor: Role,
}

impl ToolDescriptor {
    pub fn name(&self) -> &str {
        self.tool.name()
    }

    pub fn description(&self) -> &str {
        self.tool.description()
    }

    /// Role allowed to request this tool.
    pub fn caller(&self) -> Role {
        self.caller
    }

    /// Role that executes this tool.
    pub fn executor(&self) -> Role {
        self.executor
    }

    /// Schema advertised to the model.
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.tool.name().to_string(),
            description: self.tool.description().to_string(),
            parameters: self.tool.parameters().schema.clone(),
        }
    }
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name())
            .field("caller", &self.caller)
            .field("executor", &self.executor)
            .finish()
    }
}

/// Name-keyed set of tools, in registration order.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    descriptors: Vec<ToolDescriptor>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tool`, callable by `caller` and executed by `executor`.
    ///
    /// Fails with [`TriageError::DuplicateTool`] and leaves the registry
    /// unchanged when the name is taken.
    pub fn register(&mut self, tool: Arc<dyn Tool>, caller: Role, executor: Role) -> Result<()> {
        let name = tool.name().to_string();
        if self.by_name.contains_key(&name) {
            return Err(TriageError::DuplicateTool(name));
        }
        debug!(tool = %name, %caller, %executor, "registering tool");
        self.by_name.insert(name, self.descriptors.len());
        self.descriptors.push(ToolDescriptor {
            tool,
            caller,
            executor,
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.by_name.get(name).map(|&idx| &self.descriptors[idx])
    }

    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Definitions of the tools `caller` may request.
    pub fn definitions_for(&self, caller: Role) -> Vec<ToolDefinition> {
        self.descriptors
            .iter()
            .filter(|d| d.caller == caller)
            .map(ToolDescriptor::definition)
            .collect()
    }

    /// Execute `request` on behalf of `executor` within `timeout`.
    pub async fn invoke(
        &self,
        request: &ToolInvocationRequest,
        executor: Role,
        timeout: Duration,
    ) -> Result<ToolInvocationResult> {
        let descriptor = self
            .get(&request.name)
            .ok_or_else(|| TriageError::UnknownTool(request.name.clone()))?;

        if descriptor.executor != executor {
            return Err(TriageError::ToolNotPermitted {
                tool_name: request.name.clone(),
                role: executor.to_string(),
            });
        }

        let args = ToolArguments::new(request.arguments.clone());
        let ctx = ToolExecutionContext {
            tool_call_id: request.id.clone(),
            executor,
        };

        let output = tokio::time::timeout(timeout, descriptor.tool.execute(&args, &ctx))
            .await
            .map_err(|_| TriageError::ToolTimeout {
                tool_name: request.name.clone(),
                timeout_ms: timeout.as_millis() as u64,
            })??;

        Ok(ToolInvocationResult::success(request, output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tool::FunctionTool;
    use crate::tools::types::ToolParameters;

    fn constant_tool(name: &str, output: &'static str) -> Arc<dyn Tool> {
        Arc::new(FunctionTool::new(
            name,
            "constant",
            ToolParameters::empty(),
            move |_args, _ctx| async move { Ok(output.to_string()) },
        ))
    }

    fn request(name: &str) -> ToolInvocationRequest {
        ToolInvocationRequest::new("call_1", name, serde_json::json!({}))
    }

    #[test]
    fn duplicate_registration_fails_and_leaves_registry_unchanged() {
        let mut registry = ToolRegistry::new();
        registry
            .register(constant_tool("echo", "first"), Role::Assistant, Role::Requester)
            .unwrap();

        let err = registry
            .register(constant_tool("echo", "second"), Role::Requester, Role::Assistant)
            .unwrap_err();

        assert!(matches!(err, TriageError::DuplicateTool(ref name) if name == "echo"));
        assert_eq!(registry.len(), 1);
        let descriptor = registry.get("echo").unwrap();
        assert_eq!(descriptor.caller(), Role::Assistant);
        assert_eq!(descriptor.executor(), Role::Requester);
    }

    #[test]
    fn definitions_are_filtered_by_caller() {
        let mut registry = ToolRegistry::new();
        registry
            .register(constant_tool("a", ""), Role::Assistant, Role::Requester)
            .unwrap();
        registry
            .register(constant_tool("b", ""), Role::Requester, Role::Assistant)
            .unwrap();

        let names: Vec<String> = registry
            .definitions_for(Role::Assistant)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn invoke_returns_correlated_result() {
        let mut registry = ToolRegistry::new();
        registry
            .register(constant_tool("echo", "pong"), Role::Assistant, Role::Requester)
            .unwrap();

        let result = registry
            .invoke(&request("echo"), Role::Requester, Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(result.tool_call_id, "call_1");
        assert_eq!(result.tool_name, "echo");
        assert_eq!(result.content, "pong");
        assert!(!result.is_error);
    }

    #[tokio::test]
    async fn invoke_unknown_tool_fails() {
        let registry = ToolRegistry::new();
        let err = registry
            .invoke(&request("missing"), Role::Requester, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, TriageError::UnknownTool(ref name) if name == "missing"));
        assert_eq!(err.to_string(), "Function missing not found.");
    }

    #[tokio::test]
    async fn invoke_rejects_wrong_executor() {
        let mut registry = ToolRegistry::new();
        registry
            .register(constant_tool("echo", "pong"), Role::Assistant, Role::Assistant)
            .unwrap();
        let err = registry
            .invoke(&request("echo"), Role::Requester, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, TriageError::ToolNotPermitted { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn invoke_times_out_slow_tool() {
        let slow: Arc<dyn Tool> = Arc::new(FunctionTool::new(
            "slow",
            "sleeps",
            ToolParameters::empty(),
            |_args, _ctx| async move {
                tokio::time::sleep(Duration::from_secs(120)).await;
                Ok("late".to_string())
            },
        ));
        let mut registry = ToolRegistry::new();
        registry
            .register(slow, Role::Assistant, Role::Requester)
            .unwrap();

        let err = registry
            .invoke(&request("slow"), Role::Requester, Duration::from_secs(60))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TriageError::ToolTimeout { ref tool_name, timeout_ms: 60_000 } if tool_name == "slow"
        ));
    }
}
