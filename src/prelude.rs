//! Convenience re-exports for common use.

pub use crate::assistant::Assistant;
pub use crate::config::LecternConfig;
pub use crate::error::{LecternError, Result};
pub use crate::generation::{Generator, GeneratorOptions, DEFAULT_SYSTEM_PROMPT};
pub use crate::index::{CourseIndex, CourseOutline, LessonSummary, SearchResults};
pub use crate::provider::{AnthropicClient, ModelService};
pub use crate::session::SessionStore;
pub use crate::tools::{CourseOutlineTool, CourseSearchTool, Tool, ToolRegistry};
pub use crate::types::{
    ContentBlock, MessageParam, MessagesRequest, ModelResponse, Role, StopReason, ToolChoice,
    ToolDefinition, ToolResultBlock, ToolUseBlock, Usage,
};
