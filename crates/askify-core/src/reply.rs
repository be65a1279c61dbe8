//! Reply service trait.
//!
//! Defines the interface for the remote reply-generation service.

use async_trait::async_trait;

/// An abstract client for the reply-generation backend.
///
/// This trait decouples the lifecycle controller from the concrete transport
/// so that conversation flows can be tested with an injected fake.
///
/// # Implementation Notes
///
/// `reply` is total: implementations must normalize every failure (network,
/// malformed body, server-side error) into a user-facing string, so callers
/// never need a failure branch for this call. Latency is expected to be
/// non-trivial; the presentation layer shows a typing indicator while the
/// call is in flight.
#[async_trait]
pub trait ReplyService: Send + Sync {
    /// Submits a user message and returns the generated reply text.
    ///
    /// # Arguments
    ///
    /// * `message` - The user's message
    /// * `session_id` - The active session id, if a session exists
    async fn reply(&self, message: &str, session_id: Option<&str>) -> String;
}
