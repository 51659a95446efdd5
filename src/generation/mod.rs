//! Answer generation with a bounded tool-calling loop.

use std::sync::Arc;

use bon::Builder;
use tracing::{debug, warn};

use crate::error::Result;
use crate::provider::ModelService;
use crate::tools::ToolRegistry;
use crate::types::{
    ContentBlock, MessageParam, MessagesRequest, ModelResponse, StopReason, ToolChoice,
    ToolDefinition, ToolResultBlock, Usage,
};

/// Instruction text used when no prompt override is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are an AI assistant specialized in course materials and educational content, \
with access to tools over an index of course information.

Tool selection rules (follow strictly):
1. Lesson list, course outline, \"what lessons\", \"show me the syllabus\": use `get_course_outline`. Never use `search_course_content` for these queries.
2. Questions about specific course content, concepts, or explanations: use `search_course_content`.
3. General knowledge questions unrelated to a specific course: answer directly, no tool.
4. Complex multi-part queries (e.g. \"find a course on the same topic as lesson 4 of course X\"): use up to 2 sequential tool calls, first retrieving what you need, then searching with that information.

Sequential tool use:
- You may make up to 2 tool calls in separate request rounds before giving your final answer.
- After the results of your first tool call, evaluate whether you have enough information to answer completely. If not, make one additional tool call.
- Your final response must always be a natural language answer, never a tool call.
- If a tool returns no results or an error, say so clearly and answer with what you have.

When using `get_course_outline`, present:
- The course title and link
- Every lesson as: \"Lesson N: <title>\"

Response rules:
- Fact-based answers only. Do not guess or invent lesson titles.
- No meta-commentary: no \"based on the search results\", no explanation of tool usage.
- Brief, clear, and educational. Include an example when it aids understanding.
Provide only the direct answer to what was asked.";

/// Tunables for the generation loop.
#[derive(Debug, Clone, Builder)]
pub struct GeneratorOptions {
    /// Model id sent with every request.
    #[builder(into, default = crate::config::DEFAULT_MODEL.to_string())]
    pub model: String,
    /// Instruction text; per-call history is appended to it, never baked in.
    #[builder(into, default = DEFAULT_SYSTEM_PROMPT.to_string())]
    pub system_prompt: String,
    #[builder(default = 800)]
    pub max_tokens: u32,
    #[builder(default = 0.0)]
    pub temperature: f32,
    /// Tool-execution rounds. Total model calls per query never exceed
    /// `1 + max_tool_rounds`.
    #[builder(default = 2)]
    pub max_tool_rounds: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Drives the bounded round-trip protocol between a query, the model
/// service, and the tool registry.
pub struct Generator {
    service: Arc<dyn ModelService>,
    options: GeneratorOptions,
}

impl Generator {
    /// Create a generator with default options.
    pub fn new(service: Arc<dyn ModelService>) -> Self {
        Self {
            service,
            options: GeneratorOptions::default(),
        }
    }

    /// Replace the default options.
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Answer a query, letting the model call registered tools for up to
    /// `max_tool_rounds` rounds.
    ///
    /// Transport failures from the service propagate as errors; every
    /// other failure mode degrades to a returned answer string.
    pub async fn generate(
        &self,
        query: &str,
        history: Option<&str>,
        tools: Option<&[ToolDefinition]>,
        registry: Option<&ToolRegistry>,
    ) -> Result<String> {
        let system = self.build_system(history);
        // An empty catalog is the same as no catalog.
        let tools = tools.filter(|t| !t.is_empty());

        let mut messages = vec![MessageParam::user(query)];
        let mut usage = Usage::default();

        let request = self.build_request(messages.clone(), &system, tools);
        debug!(
            model = %self.options.model,
            tools = tools.map_or(0, <[ToolDefinition]>::len),
            "initial model call"
        );
        let mut current = self.service.complete(&request).await?;
        usage.merge(&current.usage);

        if current.stop_reason != StopReason::ToolUse {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "answered without tool use"
            );
            return Ok(extract_text(&current));
        }

        let Some(registry) = registry else {
            warn!("model requested a tool but no registry was supplied");
            return Ok("Unable to search: tool manager not configured.".to_string());
        };

        messages.push(MessageParam::assistant(current.content.clone()));

        for round in 0..self.options.max_tool_rounds {
            let mut results = Vec::new();
            for block in current.tool_uses() {
                let result = match registry.execute_tool(&block.name, &block.input).await {
                    Ok(output) => ToolResultBlock::ok(&block.id, output),
                    Err(e) => {
                        warn!(tool = %block.name, error = %e, "tool dispatch failed");
                        ToolResultBlock::error(&block.id, format!("Error executing tool: {e}"))
                    }
                };
                results.push(result);
            }

            if results.is_empty() {
                warn!("tool_use response carried no tool_use blocks");
                return Ok(
                    "Received malformed tool_use response: no tool_use blocks found.".to_string(),
                );
            }

            messages.push(MessageParam::tool_results(results));

            // Withholding the catalog on the last permitted round forces a
            // text answer, which is what bounds total model calls.
            let allow_another_round = round < self.options.max_tool_rounds - 1;
            let round_tools = if allow_another_round { tools } else { None };

            let request = self.build_request(messages.clone(), &system, round_tools);
            debug!(round, tools_offered = round_tools.is_some(), "tool round model call");
            current = self.service.complete(&request).await?;
            usage.merge(&current.usage);

            if current.stop_reason != StopReason::ToolUse {
                break;
            }

            messages.push(MessageParam::assistant(current.content.clone()));
        }

        debug!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "generation finished"
        );
        Ok(extract_text(&current))
    }

    fn build_system(&self, history: Option<&str>) -> String {
        match history {
            Some(history) => format!(
                "{}\n\nPrevious conversation:\n{history}",
                self.options.system_prompt
            ),
            None => self.options.system_prompt.clone(),
        }
    }

    fn build_request(
        &self,
        messages: Vec<MessageParam>,
        system: &str,
        tools: Option<&[ToolDefinition]>,
    ) -> MessagesRequest {
        MessagesRequest {
            model: self.options.model.clone(),
            max_tokens: self.options.max_tokens,
            messages,
            system: Some(system.to_string()),
            temperature: Some(self.options.temperature),
            tools: tools.map(<[ToolDefinition]>::to_vec),
            tool_choice: tools.map(|_| ToolChoice::Auto),
        }
    }
}

/// Extract the final text from a response, returning a descriptive
/// message when no text is available.
fn extract_text(response: &ModelResponse) -> String {
    match response.content.first() {
        None => "Received empty response from AI service.".to_string(),
        Some(ContentBlock::Text { text }) => text.clone(),
        Some(ContentBlock::ToolUse(_)) => {
            "Could not generate a text response within the allowed tool-use rounds.".to_string()
        }
        Some(ContentBlock::ToolResult(_)) => {
            "Received unexpected response format from AI service.".to_string()
        }
    }
}
