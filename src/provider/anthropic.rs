//! Anthropic Messages API client.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::types::{MessagesRequest, ModelResponse};

use super::http::{anthropic_headers, shared_client, status_to_error};
use super::ModelService;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

/// HTTP client for the Anthropic Messages API.
///
/// The request/response types in [`crate::types`] serialize to the wire
/// format directly, so this client is a thin POST wrapper around the
/// shared connection pool.
pub struct AnthropicClient {
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ModelService for AnthropicClient {
    async fn complete(&self, request: &MessagesRequest) -> Result<ModelResponse> {
        let url = format!("{}/messages", self.base_url);

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.as_ref().map_or(0, |t| t.len()),
            "anthropic messages call"
        );

        let resp = shared_client()
            .post(&url)
            .headers(anthropic_headers(&self.api_key, API_VERSION))
            .json(request)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        Ok(resp.json::<ModelResponse>().await?)
    }
}
