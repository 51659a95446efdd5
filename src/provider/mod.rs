//! Model service trait and the Anthropic implementation.

pub mod anthropic;
pub mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{MessagesRequest, ModelResponse};

pub use anthropic::AnthropicClient;

/// The language-model boundary.
///
/// One call per round. Implementations own transport concerns (timeouts,
/// TLS, retries) and map HTTP failures to [`crate::error::LecternError`];
/// the orchestration loop never inspects anything below this trait.
#[async_trait]
pub trait ModelService: Send + Sync {
    /// Issue one Messages API call and return the parsed response.
    async fn complete(&self, request: &MessagesRequest) -> Result<ModelResponse>;
}
