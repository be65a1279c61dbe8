//! Session store trait.
//!
//! Defines the interface to the remote session-storage service.

use super::message::{ChatMessage, ChatRole};
use super::model::SessionSummary;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract client for the remote session store.
///
/// The store is the authoritative owner of sessions and their messages; the
/// lifecycle controller only keeps caches. This trait decouples the
/// controller from the concrete transport (REST backend in production,
/// in-memory fakes in tests).
///
/// # Implementation Notes
///
/// Implementations normalize every failure into a
/// [`StoreError`](crate::error::StoreError) value; they never panic and
/// never retry. The
/// controller decides per operation how a failure degrades.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Lists all sessions for the current user.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<SessionSummary>)`: sessions in server order (newest first)
    /// - `Err(_)`: the remote state is unknown; callers keep their cache
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>>;

    /// Fetches the full message history of a session.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The id of the session to read
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<ChatMessage>)`: messages in insertion order
    /// - `Err(_)`: callers treat the history as empty
    async fn fetch_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>>;

    /// Appends a message, creating a session when `session_id` is `None`.
    ///
    /// This is the only mechanism by which a session is ever created.
    ///
    /// # Arguments
    ///
    /// * `session_id` - Existing session to append to, or `None` to create one
    /// * `role` - Author of the message
    /// * `text` - Message text
    /// * `time` - Display-formatted timestamp
    ///
    /// # Returns
    ///
    /// - `Ok(session_id)`: the id of the session now owning the message
    /// - `Err(_)`: nothing was persisted
    async fn append_message(
        &self,
        session_id: Option<&str>,
        role: ChatRole,
        text: &str,
        time: &str,
    ) -> Result<String>;

    /// Deletes a session and its messages.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: deleted; callers must refresh their cached session list
    /// - `Err(_)`: the session list is untouched (and possibly stale)
    async fn delete_session(&self, session_id: &str) -> Result<()>;
}
