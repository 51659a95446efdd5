//! The course-content index boundary.
//!
//! The crate orchestrates retrieval but does not embed or store anything
//! itself; a vector store, keyword index, or test stub plugs in behind
//! [`CourseIndex`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Read-only search surface over ingested course content.
#[async_trait]
pub trait CourseIndex: Send + Sync {
    /// Rank content fragments for a query, optionally scoped to one course
    /// and/or lesson. Failures are reported through the result's error
    /// sentinel rather than an `Err`, so a degraded index still yields a
    /// model-readable answer.
    async fn search(
        &self,
        query: &str,
        course_name: Option<&str>,
        lesson_number: Option<u32>,
    ) -> SearchResults;

    /// Resolve a (possibly partial) course name to its outline, or `None`
    /// when nothing matches.
    async fn outline(&self, course_name: &str) -> Option<CourseOutline>;
}

/// Ranked fragments plus their metadata, or an error sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub documents: Vec<String>,
    pub metadata: Vec<ChunkMetadata>,
    pub distances: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResults {
    /// A result set with no matches and no error.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An error sentinel carrying a message for the model to read.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Per-fragment provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub course_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_number: Option<u32>,
}

/// A course's lesson listing, as resolved by the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOutline {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub lessons: Vec<LessonSummary>,
}

/// One lesson in an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSummary {
    pub number: u32,
    pub title: String,
}
