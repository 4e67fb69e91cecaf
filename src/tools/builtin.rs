//! Built-in tools offered to the triage assistant.

use std::sync::Arc;

use crate::failure;
use crate::tools::tool::{FunctionTool, Tool, ToolExecutionContext};
use crate::tools::types::ToolParameters;

/// Name under which the failure source is exposed to the model.
pub const PARSE_FAILURE: &str = "parse_failure";

/// Create the `parse_failure` tool, which returns the captured CI failure.
pub fn parse_failure_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        PARSE_FAILURE,
        "Returns hard-coded CI failure headline and logs for analysis.",
        ToolParameters::empty(),
        |_args, ctx: ToolExecutionContext| async move {
            tracing::info!(tool_call_id = %ctx.tool_call_id, "executing parse_failure");
            Ok(failure::parse_failure())
        },
    ))
}
