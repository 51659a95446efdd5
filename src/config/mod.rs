//! Environment-backed configuration.

use tracing::warn;

use crate::error::{LecternError, Result};
use crate::provider::AnthropicClient;

/// Model id used when `ANTHROPIC_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Exchanges kept per session when `LECTERN_MAX_HISTORY` is unset.
pub const DEFAULT_MAX_HISTORY: usize = 2;

/// Runtime configuration for the assistant.
#[derive(Debug, Clone)]
pub struct LecternConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
    pub max_history: usize,
}

impl LecternConfig {
    /// Load from environment variables (`ANTHROPIC_API_KEY`,
    /// `ANTHROPIC_MODEL`, `ANTHROPIC_BASE_URL`, `LECTERN_MAX_HISTORY`).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. `from_env` delegates here.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = get("ANTHROPIC_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                LecternError::Configuration("ANTHROPIC_API_KEY is not set".to_string())
            })?;

        let model = get("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = get("ANTHROPIC_BASE_URL");

        let max_history = match get("LECTERN_MAX_HISTORY") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "LECTERN_MAX_HISTORY is not a number, using default");
                DEFAULT_MAX_HISTORY
            }),
            None => DEFAULT_MAX_HISTORY,
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            max_history,
        })
    }

    /// Build an API client from this configuration.
    pub fn client(&self) -> AnthropicClient {
        let client = AnthropicClient::new(&self.api_key);
        match &self.base_url {
            Some(url) => client.with_base_url(url),
            None => client,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn api_key_is_required() {
        let err = LecternConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, LecternError::Configuration(_)));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let vars = [("ANTHROPIC_API_KEY", "   ")];
        let err = LecternConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, LecternError::Configuration(_)));
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let vars = [("ANTHROPIC_API_KEY", "sk-test")];
        let config = LecternConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, None);
        assert_eq!(config.max_history, DEFAULT_MAX_HISTORY);
    }

    #[test]
    fn explicit_variables_win() {
        let vars = [
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("ANTHROPIC_MODEL", "claude-other"),
            ("ANTHROPIC_BASE_URL", "http://localhost:8080/v1"),
            ("LECTERN_MAX_HISTORY", "5"),
        ];
        let config = LecternConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.model, "claude-other");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(config.max_history, 5);
    }

    #[test]
    fn junk_max_history_falls_back_to_default() {
        let vars = [
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("LECTERN_MAX_HISTORY", "lots"),
        ];
        let config = LecternConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.max_history, DEFAULT_MAX_HISTORY);
    }
}
