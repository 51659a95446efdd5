//! Lectern: RAG assistant core for course materials.
//!
//! A bounded tool-calling loop over an Anthropic-style Messages API:
//! the model may consult retrieval tools (content search, course
//! outlines) for a fixed number of rounds before it must answer in
//! plain text. Works against any [`index::CourseIndex`] and any
//! [`provider::ModelService`].
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use lectern::prelude::*;
//!
//! # async fn example(index: Arc<dyn lectern::index::CourseIndex>) -> lectern::error::Result<()> {
//! let config = LecternConfig::from_env()?;
//! let mut assistant = Assistant::new(Arc::new(config.client()), index)
//!     .with_max_history(config.max_history);
//!
//! let (answer, sources) = assistant.query("What is covered in lesson 2?", None).await;
//! println!("{answer} (sources: {sources:?})");
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod config;
pub mod error;
pub mod generation;
pub mod index;
pub mod prelude;
pub mod provider;
pub mod session;
pub mod tools;
pub mod types;
