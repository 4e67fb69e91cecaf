//! Error types for ci-triage.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// Primary error type for all ci-triage operations.
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Model error (status {status}): {message}")]
    Model { status: u16, message: String },

    #[error("Transient network error: {0}")]
    TransientNetwork(#[source] reqwest::Error),

    #[error("HTTP error (status {status}) fetching {url}")]
    Http { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Function {0} not found.")]
    UnknownTool(String),

    #[error("Tool '{tool_name}' timed out after {timeout_ms}ms")]
    ToolTimeout { tool_name: String, timeout_ms: u64 },

    #[error("Tool execution error: {tool_name} - {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Tool '{tool_name}' may not be requested by the {role} role")]
    ToolNotCallable { tool_name: String, role: String },

    #[error("Tool '{tool_name}' may not be executed by the {role} role")]
    ToolNotPermitted { tool_name: String, role: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TriageError {
    /// Create a model error from a status code and response body.
    pub fn model(status: u16, message: impl Into<String>) -> Self {
        Self::Model {
            status,
            message: message.into(),
        }
    }

    /// Whether this error is recovered inside the conversation as a tool result.
    pub fn is_tool_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownTool(_)
                | Self::ToolTimeout { .. }
                | Self::ToolExecution { .. }
                | Self::ToolNotCallable { .. }
                | Self::ToolNotPermitted { .. }
        )
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::TransientNetwork(_) | Self::Network(_) => ErrorCategory::Network,
            Self::ToolTimeout { .. } => ErrorCategory::Timeout,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Io(_) => ErrorCategory::Io,
            Self::Model { status, .. } | Self::Http { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::DuplicateTool(_) => ErrorCategory::Configuration,
            Self::UnknownTool(_)
            | Self::ToolExecution { .. }
            | Self::ToolNotCallable { .. }
            | Self::ToolNotPermitted { .. } => ErrorCategory::ToolExecution,
        }
    }

    /// Whether a caller could reasonably retry. Nothing in this crate does.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit
                | ErrorCategory::Network
                | ErrorCategory::Timeout
                | ErrorCategory::Server
        )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Authentication => RecoverySuggestion::CheckCredentials,
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server => {
                RecoverySuggestion::RetryWithBackoff
            }
            ErrorCategory::Timeout => RecoverySuggestion::IncreaseTimeout,
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::ToolExecution => RecoverySuggestion::CheckToolImplementation,
            _ => RecoverySuggestion::ReportBug,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TriageError>;
