//! Session domain models.
//!
//! This module contains the session types the lifecycle controller operates
//! on: the cached server-side summary and the single active conversation.

use super::message::ChatMessage;
use serde::{Deserialize, Serialize};

/// A server-owned session as it appears in the session list.
///
/// The remote store is authoritative for sessions: the client holds a
/// read-only cached copy, never re-sorts it (the server returns newest
/// first), and treats it as stale after any mutating call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Opaque server-assigned identifier.
    pub session_id: String,
    /// Derived display title.
    pub title: String,
    /// Display-formatted time of the last activity.
    pub last_time: String,
}

/// The session currently receiving new messages, at most one per client.
///
/// Created only when a session-worthy message starts a new conversation, and
/// destroyed on new-chat, on deletion of this session, or on logout.
///
/// Invariants:
/// - `session_id` is immutable for the life of the value.
/// - `messages` is append-only, never reordered or mutated after insertion.
/// - Every message here has been (or is concurrently being) persisted to the
///   remote store under `session_id`; non-session-worthy exchanges never
///   enter an `ActiveSession`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    /// The server-assigned identifier of this session.
    pub session_id: String,
    /// Locally cached copy of the persisted conversation.
    pub messages: Vec<ChatMessage>,
}

impl ActiveSession {
    /// Creates an active session from a freshly created server session and
    /// the message that created it.
    pub fn new(session_id: impl Into<String>, first: ChatMessage) -> Self {
        Self {
            session_id: session_id.into(),
            messages: vec![first],
        }
    }

    /// Creates an active session from messages fetched off the store.
    pub fn with_messages(session_id: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            session_id: session_id.into(),
            messages,
        }
    }
}
