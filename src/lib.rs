//! ci-triage: analyze CI job failures with a tool-using chat model.
//!
//! A [`ConversationOrchestrator`](orchestrator::ConversationOrchestrator)
//! drives a bounded exchange between this process (the requester) and a
//! remote model (the assistant). The assistant may request registered tools,
//! which the requester executes and feeds back, until a
//! [`TerminationPredicate`](stop::TerminationPredicate) fires or the turn
//! budget runs out.
//!
//! # Quick Start
//!
//! ```no_run
//! use ci_triage::prelude::*;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> ci_triage::error::Result<()> {
//! let config = TriageConfig::from_env()?;
//! let client = ci_triage::provider::create_client(
//!     &config,
//!     Some(ci_triage::triage::SYSTEM_MESSAGE.to_string()),
//! )?;
//! let orchestrator = ci_triage::triage::build_orchestrator(client, &config)?;
//! let result = orchestrator
//!     .initiate(ci_triage::triage::PROMPT, &CancellationToken::new())
//!     .await?;
//! println!("{}", result.summary.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod failure;
pub mod logs;
pub mod orchestrator;
pub mod prelude;
pub mod provider;
pub mod stop;
pub mod tools;
pub mod triage;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
