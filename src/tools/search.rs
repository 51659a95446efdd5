//! Course content search over the index.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{LecternError, Result};
use crate::index::{CourseIndex, SearchResults};

use super::schema::ParameterBuilder;
use super::Tool;

/// Arguments accepted by `search_course_content`.
#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    course_name: Option<String>,
    #[serde(default)]
    lesson_number: Option<u32>,
}

/// Semantic search over course content, with optional course and lesson
/// filters.
///
/// Records one source label per returned fragment. The recorded list is
/// last-write-wins: a call that formats results replaces the previous
/// list wholesale, and it lives only until the next recording call or a
/// reset.
pub struct CourseSearchTool {
    index: Arc<dyn CourseIndex>,
    sources: Mutex<Vec<String>>,
}

impl CourseSearchTool {
    pub fn new(index: Arc<dyn CourseIndex>) -> Self {
        Self {
            index,
            sources: Mutex::new(Vec::new()),
        }
    }

    /// Format ranked fragments as labeled blocks and record their sources.
    fn format_results(&self, results: &SearchResults) -> String {
        let mut formatted = Vec::with_capacity(results.documents.len());
        let mut sources = Vec::with_capacity(results.documents.len());

        for (i, document) in results.documents.iter().enumerate() {
            let meta = results.metadata.get(i);
            let course_title = meta.map_or("unknown", |m| m.course_title.as_str());
            let lesson_number = meta.and_then(|m| m.lesson_number);

            let mut label = course_title.to_string();
            if let Some(n) = lesson_number {
                label.push_str(&format!(" - Lesson {n}"));
            }

            formatted.push(format!("[{label}]\n{document}"));
            sources.push(label);
        }

        *self.sources.lock().unwrap() = sources;
        formatted.join("\n\n")
    }
}

#[async_trait]
impl Tool for CourseSearchTool {
    fn name(&self) -> &str {
        "search_course_content"
    }

    fn description(&self) -> &str {
        "Search course materials with smart course name matching and lesson filtering"
    }

    fn input_schema(&self) -> serde_json::Value {
        ParameterBuilder::object()
            .string("query", "What to search for in the course content", true)
            .string(
                "course_name",
                "Course title (partial matches work, e.g. 'MCP', 'Introduction')",
                false,
            )
            .integer(
                "lesson_number",
                "Specific lesson number to search within (e.g. 1, 2, 3)",
                false,
            )
            .build()
    }

    async fn execute(&self, args: &serde_json::Value) -> Result<String> {
        let args: SearchArgs = serde_json::from_value(args.clone())
            .map_err(|e| LecternError::InvalidArgument(format!("search_course_content: {e}")))?;
        if args.query.trim().is_empty() {
            return Err(LecternError::InvalidArgument(
                "search_course_content: query must not be empty".into(),
            ));
        }

        let results = self
            .index
            .search(&args.query, args.course_name.as_deref(), args.lesson_number)
            .await;

        // An index-side failure is reported to the model as the tool's
        // output, not as a dispatch error.
        if let Some(error) = &results.error {
            return Ok(error.clone());
        }

        if results.is_empty() {
            let mut filter_info = String::new();
            if let Some(course) = &args.course_name {
                filter_info.push_str(&format!(" in course '{course}'"));
            }
            if let Some(lesson) = args.lesson_number {
                filter_info.push_str(&format!(" in lesson {lesson}"));
            }
            return Ok(format!("No relevant content found{filter_info}."));
        }

        Ok(self.format_results(&results))
    }

    fn last_sources(&self) -> Vec<String> {
        self.sources.lock().unwrap().clone()
    }

    fn reset_sources(&self) {
        self.sources.lock().unwrap().clear();
    }
}
