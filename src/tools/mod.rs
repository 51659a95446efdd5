//! Capability system: the tool trait, the registry, and the course tools.

pub mod outline;
pub mod schema;
pub mod search;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{LecternError, Result};
use crate::types::ToolDefinition;

pub use outline::CourseOutlineTool;
pub use schema::ParameterBuilder;
pub use search::CourseSearchTool;

/// A named capability the model may invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model calls).
    fn name(&self) -> &str;

    /// Human-readable description shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's input object.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute with raw JSON arguments, returning model-readable text.
    async fn execute(&self, args: &serde_json::Value) -> Result<String>;

    /// Sources recorded by the most recent `execute` call. Last-write-wins:
    /// a recording call replaces the previous list wholesale.
    fn last_sources(&self) -> Vec<String> {
        Vec::new()
    }

    /// Clear any recorded sources.
    fn reset_sources(&self) {}
}

/// Closed name → capability mapping, built at startup.
///
/// Registration order is preserved: the catalog lists tools in the order
/// they were registered, and source collection scans in the same order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name, replacing any previous tool
    /// with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.retain(|t| t.name() != name);
        self.tools.push(tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// The catalog offered to the model.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Dispatch by name. Unknown names and tool failures are both `Err`;
    /// the orchestration loop downgrades them to error-tagged tool results.
    pub async fn execute_tool(&self, name: &str, args: &serde_json::Value) -> Result<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| LecternError::UnknownTool(name.to_string()))?;
        debug!(tool = name, "dispatching tool");
        tool.execute(args).await
    }

    /// Sources from the first registered tool that recorded any.
    pub fn last_sources(&self) -> Vec<String> {
        for tool in &self.tools {
            let sources = tool.last_sources();
            if !sources.is_empty() {
                return sources;
            }
        }
        Vec::new()
    }

    /// Clear recorded sources on every tool.
    pub fn reset_sources(&self) {
        for tool in &self.tools {
            tool.reset_sources();
        }
    }
}
