//! Model service responses.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::message::{ContentBlock, ToolUseBlock};

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
    StopSequence,
    /// Catch-all for stop reasons this crate does not know about; treated
    /// the same as any non-tool_use stop.
    #[serde(other)]
    Other,
}

/// Token usage for one model call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

impl Usage {
    /// Merge another usage into this one (accumulate).
    pub fn merge(&mut self, other: &Usage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

/// One response from the model service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelResponse {
    pub stop_reason: StopReason,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub usage: Usage,
}

impl ModelResponse {
    /// A plain text response, as the real service would return for a
    /// direct answer.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            stop_reason: StopReason::EndTurn,
            content: vec![ContentBlock::Text { text: text.into() }],
            usage: Usage::default(),
        }
    }

    /// A single tool invocation response.
    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: serde_json::Value) -> Self {
        Self {
            stop_reason: StopReason::ToolUse,
            content: vec![ContentBlock::ToolUse(ToolUseBlock {
                id: id.into(),
                name: name.into(),
                input,
            })],
            usage: Usage::default(),
        }
    }

    /// Extract tool-use blocks in content order.
    pub fn tool_uses(&self) -> Vec<&ToolUseBlock> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse(tu) => Some(tu),
                _ => None,
            })
            .collect()
    }
}
