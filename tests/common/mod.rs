//! Shared test doubles: a scripted model service and a stub course index.

use std::sync::Mutex;

use async_trait::async_trait;

use lectern::error::{LecternError, Result};
use lectern::index::{ChunkMetadata, CourseIndex, CourseOutline, SearchResults};
use lectern::provider::ModelService;
use lectern::tools::Tool;
use lectern::types::{MessagesRequest, ModelResponse};

/// A model service that returns canned responses and records every request.
pub struct ScriptedService {
    responses: Mutex<Vec<Result<ModelResponse>>>,
    requests: Mutex<Vec<MessagesRequest>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a plain text response.
    pub fn queue_text(&self, text: &str) {
        self.responses
            .lock()
            .unwrap()
            .push(Ok(ModelResponse::text(text)));
    }

    /// Queue a single tool invocation response.
    pub fn queue_tool_use(&self, id: &str, name: &str, input: serde_json::Value) {
        self.responses
            .lock()
            .unwrap()
            .push(Ok(ModelResponse::tool_use(id, name, input)));
    }

    /// Queue a response built by the caller.
    pub fn queue_response(&self, response: ModelResponse) {
        self.responses.lock().unwrap().push(Ok(response));
    }

    /// Queue a transport-level failure.
    pub fn queue_error(&self, error: LecternError) {
        self.responses.lock().unwrap().push(Err(error));
    }

    /// Every request seen so far, in call order.
    pub fn requests(&self) -> Vec<MessagesRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelService for ScriptedService {
    async fn complete(&self, request: &MessagesRequest) -> Result<ModelResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Distinctive text so an unexpected extra call fails assertions.
            return Ok(ModelResponse::text("scripted service: queue exhausted"));
        }
        responses.remove(0)
    }
}

/// A course index with scripted search results and fixed outlines.
pub struct StubIndex {
    results: Mutex<Vec<SearchResults>>,
    outlines: Vec<CourseOutline>,
    search_calls: Mutex<Vec<(String, Option<String>, Option<u32>)>>,
}

impl StubIndex {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(Vec::new()),
            outlines: Vec::new(),
            search_calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue the result for the next `search` call.
    pub fn queue_result(&self, results: SearchResults) {
        self.results.lock().unwrap().push(results);
    }

    /// Queue a single-document hit.
    pub fn queue_hit(&self, course_title: &str, lesson_number: Option<u32>, document: &str) {
        self.queue_result(SearchResults {
            documents: vec![document.to_string()],
            metadata: vec![ChunkMetadata {
                course_title: course_title.to_string(),
                lesson_number,
            }],
            distances: vec![0.1],
            error: None,
        });
    }

    /// Add an outline resolvable by partial, case-insensitive title match.
    pub fn add_outline(&mut self, outline: CourseOutline) {
        self.outlines.push(outline);
    }

    /// `(query, course_name, lesson_number)` per `search` call, in order.
    pub fn search_calls(&self) -> Vec<(String, Option<String>, Option<u32>)> {
        self.search_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CourseIndex for StubIndex {
    async fn search(
        &self,
        query: &str,
        course_name: Option<&str>,
        lesson_number: Option<u32>,
    ) -> SearchResults {
        self.search_calls.lock().unwrap().push((
            query.to_string(),
            course_name.map(String::from),
            lesson_number,
        ));
        let mut results = self.results.lock().unwrap();
        if results.is_empty() {
            SearchResults::empty()
        } else {
            results.remove(0)
        }
    }

    async fn outline(&self, course_name: &str) -> Option<CourseOutline> {
        let needle = course_name.to_lowercase();
        self.outlines
            .iter()
            .find(|o| o.title.to_lowercase().contains(&needle))
            .cloned()
    }
}

/// A tool whose execution always fails.
pub struct FailingTool;

#[async_trait]
impl Tool for FailingTool {
    fn name(&self) -> &str {
        "always_fails"
    }

    fn description(&self) -> &str {
        "Fails on every call"
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _args: &serde_json::Value) -> Result<String> {
        Err(LecternError::tool("always_fails", "synthetic failure"))
    }
}
