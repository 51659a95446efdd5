//! Top-level coordinator wiring the generator, tools, and sessions.

use std::sync::Arc;

use tracing::warn;

use crate::error::{ErrorCategory, LecternError};
use crate::generation::{Generator, GeneratorOptions};
use crate::index::CourseIndex;
use crate::provider::ModelService;
use crate::session::SessionStore;
use crate::tools::{CourseOutlineTool, CourseSearchTool, ToolRegistry};

/// An assistant that answers course-material questions, keeps per-session
/// history, and reports the sources behind each answer.
pub struct Assistant {
    generator: Generator,
    registry: ToolRegistry,
    sessions: SessionStore,
}

impl Assistant {
    /// Create an assistant with both retrieval tools registered over `index`.
    pub fn new(service: Arc<dyn ModelService>, index: Arc<dyn CourseIndex>) -> Self {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(CourseSearchTool::new(Arc::clone(&index))));
        registry.register(Arc::new(CourseOutlineTool::new(index)));
        Self {
            generator: Generator::new(service),
            registry,
            sessions: SessionStore::default(),
        }
    }

    /// Set generation options.
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.generator = self.generator.with_options(options);
        self
    }

    /// Set how many exchanges each session retains.
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.sessions = SessionStore::new(max_history);
        self
    }

    /// Create a new conversation session and return its id.
    pub fn create_session(&mut self) -> String {
        self.sessions.create_session()
    }

    /// Drop a session and its history.
    pub fn clear_session(&mut self, session_id: &str) {
        self.sessions.clear_session(session_id);
    }

    /// Answer a question, optionally continuing a session.
    ///
    /// Always returns an answer string; service failures are folded into a
    /// user-facing message with empty sources rather than propagated.
    pub async fn query(
        &mut self,
        question: &str,
        session_id: Option<&str>,
    ) -> (String, Vec<String>) {
        let prompt = format!("Answer this question about course materials: {question}");
        let history = session_id.and_then(|id| self.sessions.formatted_history(id));

        let definitions = self.registry.definitions();
        let outcome = self
            .generator
            .generate(
                &prompt,
                history.as_deref(),
                Some(&definitions),
                Some(&self.registry),
            )
            .await;

        let answer = match outcome {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "query failed");
                // A partial tool round may have recorded sources already.
                self.registry.reset_sources();
                return (friendly_error(&e), Vec::new());
            }
        };

        let sources = self.registry.last_sources();
        self.registry.reset_sources();

        if let Some(id) = session_id {
            self.sessions.add_exchange(id, question, &answer);
        }

        (answer, sources)
    }
}

/// Map a failure onto a message fit for end users.
fn friendly_error(error: &LecternError) -> String {
    match error.category() {
        ErrorCategory::Authentication => {
            "There is an authentication error with the AI service. \
             Please check the API key configuration."
                .to_string()
        }
        ErrorCategory::RateLimit => {
            "The AI service is currently rate limited. Please try again in a moment.".to_string()
        }
        _ => "The AI service could not process the request. Please try again.".to_string(),
    }
}
