//! Course outline lookup.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{LecternError, Result};
use crate::index::{CourseIndex, CourseOutline};

use super::schema::ParameterBuilder;
use super::Tool;

/// Arguments accepted by `get_course_outline`.
#[derive(Debug, Deserialize)]
struct OutlineArgs {
    course_name: String,
}

/// Resolves a course name to its full lesson listing.
pub struct CourseOutlineTool {
    index: Arc<dyn CourseIndex>,
    sources: Mutex<Vec<String>>,
}

impl CourseOutlineTool {
    pub fn new(index: Arc<dyn CourseIndex>) -> Self {
        Self {
            index,
            sources: Mutex::new(Vec::new()),
        }
    }

    fn format_outline(outline: &CourseOutline) -> String {
        let mut lines = vec![format!("Course: {}", outline.title)];
        if let Some(link) = &outline.link {
            lines.push(format!("Course Link: {link}"));
        }
        for lesson in &outline.lessons {
            lines.push(format!("Lesson {}: {}", lesson.number, lesson.title));
        }
        lines.join("\n")
    }
}

#[async_trait]
impl Tool for CourseOutlineTool {
    fn name(&self) -> &str {
        "get_course_outline"
    }

    fn description(&self) -> &str {
        "Get a course's full outline: title, link, and every lesson number and title"
    }

    fn input_schema(&self) -> serde_json::Value {
        ParameterBuilder::object()
            .string(
                "course_name",
                "Course title to look up (partial matches work)",
                true,
            )
            .build()
    }

    async fn execute(&self, args: &serde_json::Value) -> Result<String> {
        let args: OutlineArgs = serde_json::from_value(args.clone())
            .map_err(|e| LecternError::InvalidArgument(format!("get_course_outline: {e}")))?;
        if args.course_name.trim().is_empty() {
            return Err(LecternError::InvalidArgument(
                "get_course_outline: course_name must not be empty".into(),
            ));
        }

        match self.index.outline(&args.course_name).await {
            Some(outline) => {
                *self.sources.lock().unwrap() = vec![outline.title.clone()];
                Ok(Self::format_outline(&outline))
            }
            None => Ok(format!(
                "No course found matching '{}'.",
                args.course_name
            )),
        }
    }

    fn last_sources(&self) -> Vec<String> {
        self.sources.lock().unwrap().clone()
    }

    fn reset_sources(&self) {
        self.sources.lock().unwrap().clear();
    }
}
