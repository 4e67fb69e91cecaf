//! Provider formatting helpers.

use serde_json::Value;

/// Render tool-call arguments the way chat-completion APIs expect: a JSON string.
pub(crate) fn arguments_to_string(value: &Value) -> String {
    match value {
        Value::Null => "{}".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse wire arguments, keeping the raw string when it is not valid JSON.
pub(crate) fn arguments_from_string(raw: String) -> Value {
    if raw.trim().is_empty() {
        return Value::Object(Default::default());
    }
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}
