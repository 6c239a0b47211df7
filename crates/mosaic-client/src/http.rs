//! HTTP fetch primitive for the directory and conversation snapshots.

use std::time::Duration;

use async_trait::async_trait;
use mosaic_common::{ConversationId, FetchError, Timestamp};
use mosaic_config::ServerConfig;
use tracing::debug;

/// Request/response access to conversation history. Each call is a full
/// resend of what the server holds; the body is returned undecoded.
#[async_trait]
pub trait ConversationApi: Send + Sync {
    async fn fetch_conversation_list(&self) -> Result<Vec<u8>, FetchError>;

    /// `before` is a pagination cursor; servers may ignore it.
    async fn fetch_conversation_snapshot(
        &self,
        id: &ConversationId,
        before: Option<Timestamp>,
    ) -> Result<Vec<u8>, FetchError>;
}

/// [`ConversationApi`] over `reqwest`.
pub struct HttpApi {
    config: ServerConfig,
    http: reqwest::Client,
}

impl HttpApi {
    pub fn new(config: ServerConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(u64::from(config.request_timeout_secs)))
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    async fn get(&self, url: String, before: Option<Timestamp>) -> Result<Vec<u8>, FetchError> {
        debug!(url = %url, ?before, "HTTP GET");

        let mut request = self.http.get(&url);
        if let Some(before) = before {
            request = request.query(&[("before", before)]);
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await.map_err(|e| self.map_error(e))?;
        Ok(body.to_vec())
    }

    fn map_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(u64::from(self.config.request_timeout_secs))
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl ConversationApi for HttpApi {
    async fn fetch_conversation_list(&self) -> Result<Vec<u8>, FetchError> {
        self.get(self.config.conversations_url(), None).await
    }

    async fn fetch_conversation_snapshot(
        &self,
        id: &ConversationId,
        before: Option<Timestamp>,
    ) -> Result<Vec<u8>, FetchError> {
        self.get(self.config.conversation_url(id.as_str()), before)
            .await
    }
}
