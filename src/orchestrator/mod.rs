//! Conversation orchestration (turn loop, tool dispatch, termination).

pub mod events;
pub mod runner;
pub mod types;

pub use events::*;
pub use runner::*;
pub use types::*;
