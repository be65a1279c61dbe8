//! Chat message types.
//!
//! This module contains types for representing messages in a conversation,
//! matching the backend's wire format (`{role, text, time}`).

use serde::{Deserialize, Serialize};

/// Represents the author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Message from the user.
    User,
    /// Message from the Askify bot.
    Bot,
}

/// A single message in a conversation.
///
/// Messages are append-only within a session; insertion order is significant
/// and is how the transcript renders (top to bottom, chronological).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The author of the message.
    pub role: ChatRole,
    /// The message text.
    pub text: String,
    /// Display-formatted clock time (e.g. "14:05").
    pub time: String,
}

impl ChatMessage {
    /// Creates a message stamped with the current local time.
    pub fn now(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            time: now_time(),
        }
    }
}

/// Returns the current local time formatted for display in the transcript.
pub fn now_time() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&ChatRole::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn message_round_trips_wire_format() {
        let json = r#"{"role":"bot","text":"hello","time":"09:30"}"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.role, ChatRole::Bot);
        assert_eq!(msg.text, "hello");
        assert_eq!(serde_json::to_string(&msg).unwrap(), json);
    }

    #[test]
    fn now_time_is_clock_shaped() {
        let t = now_time();
        assert_eq!(t.len(), 5);
        assert_eq!(t.as_bytes()[2], b':');
    }
}
