//! HttpReplyService - REST implementation of the reply-generation client.
//!
//! Posts to `{base}/chat` and always yields a displayable string: server-side
//! error text when the backend reports one, fixed fallbacks when the backend
//! is unreachable or answers nonsense. Callers never see a failure branch.

use crate::config::BackendConfig;
use askify_core::reply::ReplyService;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

// Reply generation is slow; give it far more headroom than the store calls.
const REPLY_TIMEOUT: Duration = Duration::from_secs(120);

const UNREACHABLE_REPLY: &str = "Error: Could not connect to backend";
const EMPTY_REPLY: &str = "Error: No reply from backend";

/// Reply client backed by the Askify REST backend.
#[derive(Clone)]
pub struct HttpReplyService {
    client: Client,
    config: BackendConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    session_id: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    reply: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpReplyService {
    /// Creates a reply client for the configured backend.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Picks the display text out of a chat response: the reply if present,
    /// otherwise the server's error text, otherwise the empty-reply fallback.
    fn extract_reply(response: ChatResponse) -> String {
        response
            .reply
            .or(response.error)
            .unwrap_or_else(|| EMPTY_REPLY.to_string())
    }
}

#[async_trait]
impl ReplyService for HttpReplyService {
    async fn reply(&self, message: &str, session_id: Option<&str>) -> String {
        let url = format!("{}/chat", self.config.api_base);
        let request = self
            .client
            .post(&url)
            .header("X-User-Email", &self.config.user_email)
            .json(&ChatRequest {
                message,
                session_id,
            })
            .timeout(REPLY_TIMEOUT);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "chat request failed");
                return UNREACHABLE_REPLY.to_string();
            }
        };

        // Error bodies also come back as {"error": ...}, so decode regardless
        // of status and fall back only when the body is unusable.
        match response.json::<ChatResponse>().await {
            Ok(body) => Self::extract_reply(body),
            Err(e) => {
                warn!(error = %e, "chat response could not be decoded");
                EMPTY_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_field_wins() {
        let response = ChatResponse {
            reply: Some("hi there".to_string()),
            error: Some("ignored".to_string()),
        };
        assert_eq!(HttpReplyService::extract_reply(response), "hi there");
    }

    #[test]
    fn error_field_is_surfaced_as_text() {
        let response = ChatResponse {
            reply: None,
            error: Some("quota exceeded".to_string()),
        };
        assert_eq!(HttpReplyService::extract_reply(response), "quota exceeded");
    }

    #[test]
    fn empty_body_falls_back() {
        assert_eq!(
            HttpReplyService::extract_reply(ChatResponse::default()),
            EMPTY_REPLY
        );
    }

    #[test]
    fn chat_request_shape_matches_backend() {
        let json = serde_json::to_value(&ChatRequest {
            message: "hello",
            session_id: None,
        })
        .unwrap();
        assert_eq!(json["message"], "hello");
        assert!(json["session_id"].is_null());
    }
}
