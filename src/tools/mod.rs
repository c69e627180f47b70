//! Tool system: callable capabilities and the registry that guards them.

pub mod arguments;
pub mod markdown;
pub mod registry;
pub mod search;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use markdown::{MarkdownFileTool, MARKDOWN_TOOL_NAME};
pub use registry::{RegisteredTool, ToolRegistry};
pub use search::{SearchResult, SearchTool, SEARCH_TOOL_NAME};
pub use tool::{AgentTool, Tool, ToolExecutionContext};
pub use types::{AgentToolParameters, ToolDefinition};
