//! Configuration (layered: CLI flags > env / `.env` > defaults).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, TriageError};

/// Environment variable carrying the model credential.
pub const API_KEY_ENV: &str = "API_KEY";
pub const MODEL_ENV: &str = "TRIAGE_MODEL";
pub const BASE_URL_ENV: &str = "TRIAGE_BASE_URL";
pub const MAX_TURNS_ENV: &str = "TRIAGE_MAX_TURNS";
pub const TOOL_TIMEOUT_ENV: &str = "TRIAGE_TOOL_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_TURNS: u32 = 7;
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(60);

/// Runtime configuration for a triage run.
#[derive(Clone, PartialEq)]
pub struct TriageConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub max_turns: u32,
    pub tool_timeout: Duration,
}

impl fmt::Debug for TriageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriageConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_turns", &self.max_turns)
            .field("tool_timeout", &self.tool_timeout)
            .finish()
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_turns: DEFAULT_MAX_TURNS,
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }
}

impl TriageConfig {
    /// Load from the process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.api_key = lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty());
        if let Some(model) = lookup(MODEL_ENV) {
            config.model = model;
        }
        if let Some(url) = lookup(BASE_URL_ENV) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(MAX_TURNS_ENV) {
            config.max_turns = parse_var(MAX_TURNS_ENV, &raw)?;
        }
        if let Some(raw) = lookup(TOOL_TIMEOUT_ENV) {
            config.tool_timeout = Duration::from_secs(parse_var(TOOL_TIMEOUT_ENV, &raw)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values the orchestrator cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_turns == 0 {
            return Err(TriageError::Configuration(
                "max turns must be at least 1".into(),
            ));
        }
        if self.tool_timeout.is_zero() {
            return Err(TriageError::Configuration(
                "tool timeout must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// The credential, or a configuration error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| TriageError::Configuration(format!("set {API_KEY_ENV} in env.")))
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| TriageError::Configuration(format!("invalid value for {name}: '{raw}'")))
}
