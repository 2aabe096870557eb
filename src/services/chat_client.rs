use async_trait::async_trait;
use tracing::debug;

use crate::error::ChatError;
use crate::message::{ChatRequest, ChatResponse, ErrorBody};

pub const DEFAULT_ENDPOINT_PATH: &str = "/api/chat";

/// Delivers one chat turn to the backend.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError>;
}

/// Message shown when a non-2xx response carries no usable `detail`.
pub fn status_fallback(status: u16) -> String {
    format!("Erro {status}")
}

/// JSON-over-HTTP transport. No timeout and no retry: the call runs until the
/// underlying connection succeeds or fails.
#[derive(Clone, Debug)]
pub struct HttpChatClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpChatClient {
    pub fn new(base_url: &str, path: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let endpoint = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        Self { http: reqwest::Client::new(), endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpChatClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        debug!(endpoint = %self.endpoint, session_id = %request.session_id, "posting chat message");

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(ChatError::transport)?;

        let status = response.status();
        if !status.is_success() {
            // body is optional and may not be JSON at all
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .filter(|detail| !detail.is_empty())
                .unwrap_or_else(|| status_fallback(status.as_u16()));
            return Err(ChatError::Server { status: status.as_u16(), detail });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(ChatError::transport)
    }
}
