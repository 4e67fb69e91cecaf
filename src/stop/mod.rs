//! Termination predicates for multi-turn chats.
//!
//! A predicate inspects the rendered text of the latest assistant message
//! (tool-call payloads are ignored) and decides whether the exchange has
//! produced its final answer. Evaluated once per assistant turn.

use crate::types::ChatMessage;

/// Heading the triage assistant is asked to conclude with.
pub const ROOT_CAUSES_HEADING: &str = "Plausible Root Causes:";

/// Decides when a conversation is finished.
pub trait TerminationPredicate: Send + Sync {
    /// `text` is `None` when the assistant message carried no text content.
    fn should_terminate(&self, text: Option<&str>) -> bool;

    /// Evaluate against an assistant message.
    fn is_termination_message(&self, message: &ChatMessage) -> bool {
        self.should_terminate(message.text().as_deref())
    }
}

/// Terminate when a literal phrase appears anywhere in the text (case-sensitive).
#[derive(Debug, Clone)]
pub struct PhraseTermination {
    phrase: String,
}

impl PhraseTermination {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }
}

impl Default for PhraseTermination {
    fn default() -> Self {
        Self::new(ROOT_CAUSES_HEADING)
    }
}

impl TerminationPredicate for PhraseTermination {
    fn should_terminate(&self, text: Option<&str>) -> bool {
        match text {
            Some(text) if !text.is_empty() => text.contains(&self.phrase),
            _ => false,
        }
    }
}

/// Terminate when a regex matches the text.
pub struct RegexTermination {
    regex: regex::Regex,
}

impl RegexTermination {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: regex::Regex::new(pattern)?,
        })
    }
}

impl TerminationPredicate for RegexTermination {
    fn should_terminate(&self, text: Option<&str>) -> bool {
        text.is_some_and(|text| self.regex.is_match(text))
    }
}

/// Terminate when a custom closure returns true.
pub struct FnTermination<F: Fn(Option<&str>) -> bool + Send + Sync> {
    predicate: F,
}

impl<F: Fn(Option<&str>) -> bool + Send + Sync> FnTermination<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F: Fn(Option<&str>) -> bool + Send + Sync> TerminationPredicate for FnTermination<F> {
    fn should_terminate(&self, text: Option<&str>) -> bool {
        (self.predicate)(text)
    }
}
