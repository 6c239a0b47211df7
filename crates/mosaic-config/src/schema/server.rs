//! Server endpoint configuration.

use serde::{Deserialize, Serialize};

/// Where the conversation API and the push channel live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the HTTP API (directory and snapshots).
    pub base_url: String,
    /// WebSocket URL of the live push channel.
    pub push_url: String,
    /// Per-request timeout in seconds (valid range: 1-120).
    pub request_timeout_secs: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            push_url: "ws://localhost:8000/push".into(),
            request_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    /// URL of the conversation directory.
    pub fn conversations_url(&self) -> String {
        format!("{}/api/conversations", self.base_url.trim_end_matches('/'))
    }

    /// URL of one conversation's snapshot.
    pub fn conversation_url(&self, id: &str) -> String {
        format!("{}/{id}", self.conversations_url())
    }

    /// Point at another server, moving the push channel along with it.
    ///
    /// `http` becomes `ws` and `https` becomes `wss`; the push path is `/push`.
    /// A base URL with neither scheme leaves `push_url` untouched.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
        if let Some(push_url) = push_url_for(&self.base_url) {
            self.push_url = push_url;
        }
    }
}

fn push_url_for(base_url: &str) -> Option<String> {
    let base = base_url.trim_end_matches('/');
    let ws = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        return None;
    };
    Some(format!("{ws}/push"))
}
