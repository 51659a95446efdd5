//! In-memory conversation sessions with bounded history.

use std::collections::HashMap;

use uuid::Uuid;

/// One user/assistant message pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user_message: String,
    pub assistant_message: String,
}

/// Manages multiple named sessions, each keeping the most recent
/// `max_history` exchanges.
#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<String, Vec<Exchange>>,
    max_history: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(2)
    }
}

impl SessionStore {
    pub fn new(max_history: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            max_history,
        }
    }

    /// Create a new empty session and return its id.
    pub fn create_session(&mut self) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.sessions.insert(session_id.clone(), Vec::new());
        session_id
    }

    /// Record a completed exchange, creating the session if needed.
    ///
    /// Oldest exchanges are dropped once the session exceeds `max_history`.
    pub fn add_exchange(&mut self, session_id: &str, user_message: &str, assistant_message: &str) {
        let exchanges = self.sessions.entry(session_id.to_string()).or_default();
        exchanges.push(Exchange {
            user_message: user_message.to_string(),
            assistant_message: assistant_message.to_string(),
        });
        if exchanges.len() > self.max_history {
            let excess = exchanges.len() - self.max_history;
            exchanges.drain(..excess);
        }
    }

    /// Render a session as alternating `User:`/`Assistant:` lines.
    ///
    /// Returns `None` for unknown or empty sessions so callers can skip
    /// the history block entirely.
    pub fn formatted_history(&self, session_id: &str) -> Option<String> {
        let exchanges = self.sessions.get(session_id)?;
        if exchanges.is_empty() {
            return None;
        }
        let lines: Vec<String> = exchanges
            .iter()
            .map(|e| format!("User: {}\nAssistant: {}", e.user_message, e.assistant_message))
            .collect();
        Some(lines.join("\n"))
    }

    /// Drop a session and its history.
    pub fn clear_session(&mut self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_sessions_start_empty() {
        let mut store = SessionStore::default();
        let id = store.create_session();
        assert_eq!(store.formatted_history(&id), None);
    }

    #[test]
    fn session_ids_are_unique() {
        let mut store = SessionStore::default();
        let a = store.create_session();
        let b = store.create_session();
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_session_has_no_history() {
        let store = SessionStore::default();
        assert_eq!(store.formatted_history("nope"), None);
    }

    #[test]
    fn exchanges_format_as_user_assistant_lines() {
        let mut store = SessionStore::default();
        store.add_exchange("s", "What is MCP?", "A protocol.");
        store.add_exchange("s", "Who made it?", "Anthropic.");
        assert_eq!(
            store.formatted_history("s").unwrap(),
            "User: What is MCP?\nAssistant: A protocol.\n\
             User: Who made it?\nAssistant: Anthropic."
        );
    }

    #[test]
    fn history_keeps_only_the_most_recent_exchanges() {
        let mut store = SessionStore::new(2);
        store.add_exchange("s", "q1", "a1");
        store.add_exchange("s", "q2", "a2");
        store.add_exchange("s", "q3", "a3");
        assert_eq!(
            store.formatted_history("s").unwrap(),
            "User: q2\nAssistant: a2\nUser: q3\nAssistant: a3"
        );
    }

    #[test]
    fn add_exchange_creates_missing_sessions() {
        let mut store = SessionStore::default();
        store.add_exchange("fresh", "q", "a");
        assert!(store.formatted_history("fresh").is_some());
    }

    #[test]
    fn cleared_sessions_forget_everything() {
        let mut store = SessionStore::default();
        store.add_exchange("s", "q", "a");
        store.clear_session("s");
        assert_eq!(store.formatted_history("s"), None);
    }
}
