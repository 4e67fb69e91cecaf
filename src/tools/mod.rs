//! Tool system for function calling.

pub mod arguments;
pub mod builtin;
pub mod registry;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use registry::{ToolDescriptor, ToolRegistry};
pub use tool::{FunctionTool, Tool, ToolExecutionContext};
pub use types::ToolParameters;
