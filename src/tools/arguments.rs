//! Tool call arguments.

/// Arguments the assistant attached to a tool request, passed through to the
/// tool unchanged.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    pub value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }
}
