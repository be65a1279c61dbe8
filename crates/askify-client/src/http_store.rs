//! HttpSessionStore - REST implementation of the session store client.
//!
//! Talks to the Askify backend's session endpoints:
//! - `GET    {base}/sessions`
//! - `GET    {base}/sessions/{id}/messages`
//! - `POST   {base}/messages`
//! - `DELETE {base}/sessions/{id}`
//!
//! Every request carries an `X-User-Email` header identifying the user.

use crate::config::BackendConfig;
use askify_core::error::{Result, StoreError};
use askify_core::session::{ChatMessage, ChatRole, SessionStore, SessionSummary};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const STORE_TIMEOUT: Duration = Duration::from_secs(30);

/// Session store client backed by the Askify REST backend.
#[derive(Clone)]
pub struct HttpSessionStore {
    client: Client,
    config: BackendConfig,
}

#[derive(Debug, Deserialize)]
struct SessionsResponse {
    sessions: Vec<SessionSummary>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct AppendRequest<'a> {
    session_id: Option<&'a str>,
    role: ChatRole,
    text: &'a str,
    time: &'a str,
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    session_id: String,
}

impl HttpSessionStore {
    /// Creates a store client for the configured backend.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base, path)
    }

    fn with_identity(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-User-Email", &self.config.user_email)
            .timeout(STORE_TIMEOUT)
    }

    /// Sends a request and decodes a JSON body, normalizing every failure
    /// into a `StoreError`.
    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = self
            .with_identity(request)
            .send()
            .await
            .map_err(|e| StoreError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::rejected(status.as_u16(), body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::bad_response(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for HttpSessionStore {
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let request = self.client.get(self.url("/sessions"));
        let body: SessionsResponse = self.send_json(request).await?;
        // Server order (newest first) is preserved as-is
        Ok(body.sessions)
    }

    async fn fetch_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let request = self
            .client
            .get(self.url(&format!("/sessions/{}/messages", session_id)));
        let body: MessagesResponse = self.send_json(request).await?;
        Ok(body.messages)
    }

    async fn append_message(
        &self,
        session_id: Option<&str>,
        role: ChatRole,
        text: &str,
        time: &str,
    ) -> Result<String> {
        let request = self.client.post(self.url("/messages")).json(&AppendRequest {
            session_id,
            role,
            text,
            time,
        });
        let body: AppendResponse = self.send_json(request).await?;
        Ok(body.session_id)
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.url(&format!("/sessions/{}", session_id)));

        let response = self
            .with_identity(request)
            .send()
            .await
            .map_err(|e| StoreError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::rejected(status.as_u16(), body));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_request_omits_no_fields() {
        let request = AppendRequest {
            session_id: Some("s1"),
            role: ChatRole::User,
            text: "hi",
            time: "10:00",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["session_id"], "s1");
        assert_eq!(json["role"], "user");
        assert_eq!(json["text"], "hi");
        assert_eq!(json["time"], "10:00");
    }

    #[test]
    fn append_request_sends_null_session_id_on_create() {
        let request = AppendRequest {
            session_id: None,
            role: ChatRole::User,
            text: "what is rust",
            time: "10:00",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["session_id"].is_null());
    }

    #[test]
    fn sessions_response_decodes_server_shape() {
        let body = r#"{"sessions":[
            {"session_id":"s2","title":"newest","last_time":"12:01"},
            {"session_id":"s1","title":"older","last_time":"11:30"}
        ]}"#;
        let parsed: SessionsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.sessions.len(), 2);
        assert_eq!(parsed.sessions[0].session_id, "s2");
    }

    #[test]
    fn messages_response_decodes_server_shape() {
        let body = r#"{"messages":[{"role":"user","text":"hi","time":"09:00"}]}"#;
        let parsed: MessagesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.messages[0].role, ChatRole::User);
    }

    #[test]
    fn url_joins_base_and_path() {
        let store = HttpSessionStore::new(BackendConfig::new("http://x.test/", "a@b.c"));
        assert_eq!(store.url("/sessions"), "http://x.test/sessions");
    }
}
