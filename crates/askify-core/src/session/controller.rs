use super::classifier::is_session_worthy;
use super::message::{ChatMessage, ChatRole};
use super::model::{ActiveSession, SessionSummary};
use super::store::SessionStore;
use crate::reply::ReplyService;
use std::sync::Arc;
use tracing::{debug, warn};

/// The result of a user submit, reported as an explicit value so the
/// presentation layer (and tests) can inspect what actually happened instead
/// of relying on side-channel logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty or whitespace-only input; nothing happened.
    Ignored,
    /// Session creation failed; no reply was requested.
    SessionCreateFailed,
    /// The exchange completed and both turns are in the transcript.
    Replied {
        /// The active session id, if the exchange ran inside a session.
        session_id: Option<String>,
        /// Whether the user turn reached the store.
        user_persisted: bool,
        /// Whether the bot reply reached the store.
        reply_persisted: bool,
    },
}

/// Orchestrates the session lifecycle against the two remote services.
///
/// `SessionLifecycleController` is responsible for:
/// - Creating a session when a session-worthy message starts a conversation
/// - Appending user and bot turns to the active session (best-effort)
/// - Switching between, deleting, and clearing sessions
/// - Keeping the cached session list and the rendered transcript consistent
///   with the remote store
///
/// The `transcript` is a render-only log and is deliberately distinct from
/// `ActiveSession::messages`: the transcript holds what the user sees
/// (including optimistic appends, welcome text, and unpersisted small talk),
/// while the active session only holds messages confirmed by the store.
///
/// All operations take `&mut self`; the exclusive borrow makes overlapping
/// submits unrepresentable. A front end that allows rapid re-submits
/// serializes them, it never interleaves them. Every remote call is attempted
/// exactly once per invocation; there is no retry and no controller-level
/// timeout.
pub struct SessionLifecycleController {
    /// Remote session store (authoritative for persisted history).
    store: Arc<dyn SessionStore>,
    /// Remote reply-generation service.
    replies: Arc<dyn ReplyService>,
    /// The session currently receiving messages, if any.
    active: Option<ActiveSession>,
    /// Cached session list, in server order (newest first).
    sessions: Vec<SessionSummary>,
    /// Render-only message log.
    transcript: Vec<ChatMessage>,
}

impl SessionLifecycleController {
    /// Creates a controller with injected remote clients.
    pub fn new(store: Arc<dyn SessionStore>, replies: Arc<dyn ReplyService>) -> Self {
        Self {
            store,
            replies,
            active: None,
            sessions: Vec::new(),
            transcript: Vec::new(),
        }
    }

    /// The rendered message log, in display order.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// The cached session list, in server order.
    pub fn sessions(&self) -> &[SessionSummary] {
        &self.sessions
    }

    /// The currently active session, if any.
    pub fn active_session(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    /// The id of the currently active session, if any.
    pub fn active_session_id(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.session_id.as_str())
    }

    /// Handles a user submit end to end.
    ///
    /// The user's message is rendered optimistically and unconditionally;
    /// whether a session is created or touched depends on the active session
    /// and on whether the text is session-worthy. Persistence of turns into
    /// an existing session is best-effort: a failed append degrades to a
    /// warning while the conversation continues. Only a failed session
    /// *creation* aborts the flow before any reply is requested.
    pub async fn handle_user_submit(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        // Optimistic render, independent of any persistence outcome.
        let user_msg = ChatMessage::now(ChatRole::User, text);
        self.transcript.push(user_msg.clone());

        let mut user_persisted = false;
        match &self.active {
            None if !is_session_worthy(text) => {
                // Small talk with no session: answer without creating or
                // touching any session. This path leaves no persisted trace.
                let reply = self.replies.reply(text, None).await;
                self.transcript.push(ChatMessage::now(ChatRole::Bot, reply));
                return SubmitOutcome::Replied {
                    session_id: None,
                    user_persisted: false,
                    reply_persisted: false,
                };
            }
            None => {
                // Session-worthy first message: persisting it is what creates
                // the session. Failure here aborts the submit.
                match self
                    .store
                    .append_message(None, ChatRole::User, text, &user_msg.time)
                    .await
                {
                    Ok(session_id) => {
                        debug!(%session_id, "session created");
                        self.active = Some(ActiveSession::new(session_id, user_msg));
                        user_persisted = true;
                        self.refresh_sessions().await;
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to create session");
                        return SubmitOutcome::SessionCreateFailed;
                    }
                }
            }
            Some(active) => {
                let session_id = active.session_id.clone();
                match self
                    .store
                    .append_message(Some(&session_id), ChatRole::User, text, &user_msg.time)
                    .await
                {
                    Ok(_) => {
                        user_persisted = true;
                        if let Some(active) = self.active.as_mut() {
                            active.messages.push(user_msg);
                        }
                    }
                    // Best-effort: the reply is still requested even when the
                    // user turn did not reach the store.
                    Err(e) => {
                        warn!(error = %e, %session_id, "failed to save user message")
                    }
                }
            }
        }

        let session_id = self.active.as_ref().map(|a| a.session_id.clone());
        let reply = self.replies.reply(text, session_id.as_deref()).await;
        let bot_msg = ChatMessage::now(ChatRole::Bot, reply);
        self.transcript.push(bot_msg.clone());

        let mut reply_persisted = false;
        if let Some(sid) = &session_id {
            match self
                .store
                .append_message(Some(sid), ChatRole::Bot, &bot_msg.text, &bot_msg.time)
                .await
            {
                Ok(_) => {
                    reply_persisted = true;
                    if let Some(active) = self.active.as_mut() {
                        active.messages.push(bot_msg);
                    }
                }
                Err(e) => warn!(error = %e, session_id = %sid, "failed to save bot reply"),
            }
            // Title and last-activity time may have changed server-side.
            self.refresh_sessions().await;
        }

        SubmitOutcome::Replied {
            session_id,
            user_persisted,
            reply_persisted,
        }
    }

    /// Initial flow on startup: fetch the session list and show the welcome
    /// message (rendered only, never persisted).
    pub async fn start(&mut self, welcome: &str) {
        self.refresh_sessions().await;
        self.transcript.clear();
        self.show_welcome(welcome);
    }

    /// Starts a fresh conversation: clears the transcript, drops the active
    /// session, and shows the welcome message. The cached session list is
    /// left as-is; no session is created until a session-worthy message
    /// arrives.
    pub fn new_chat(&mut self, welcome: &str) {
        self.transcript.clear();
        self.active = None;
        self.show_welcome(welcome);
    }

    /// Opens a stored session: fetches its history, replaces the transcript
    /// with it, and makes it the active session.
    ///
    /// A failed fetch degrades to an empty history; the session still becomes
    /// active so subsequent turns append to it.
    pub async fn select_session(&mut self, session_id: &str) {
        let messages = match self.store.fetch_messages(session_id).await {
            Ok(messages) => messages,
            Err(e) => {
                warn!(error = %e, %session_id, "failed to fetch session messages");
                Vec::new()
            }
        };
        self.transcript = messages.clone();
        self.active = Some(ActiveSession::with_messages(session_id, messages));
    }

    /// Deletes a session on the store.
    ///
    /// On success the cached list is refreshed, and when the deleted session
    /// was the active one the active session and transcript are cleared. On
    /// failure all local state is left untouched (the cache may be stale) and
    /// `false` is returned.
    pub async fn delete_session(&mut self, session_id: &str) -> bool {
        match self.store.delete_session(session_id).await {
            Ok(()) => {
                if self
                    .active
                    .as_ref()
                    .is_some_and(|a| a.session_id == session_id)
                {
                    self.active = None;
                    self.transcript.clear();
                }
                self.refresh_sessions().await;
                true
            }
            Err(e) => {
                warn!(error = %e, %session_id, "failed to delete session");
                false
            }
        }
    }

    /// Deletes the active session, if there is one. No-op returning `false`
    /// when none is active.
    pub async fn clear_active_session(&mut self) -> bool {
        match self.active.as_ref().map(|a| a.session_id.clone()) {
            Some(session_id) => self.delete_session(&session_id).await,
            None => false,
        }
    }

    /// Re-fetches the session list. On failure the previous cache is kept
    /// unchanged and a warning is logged.
    pub async fn refresh_sessions(&mut self) {
        match self.store.list_sessions().await {
            Ok(sessions) => self.sessions = sessions,
            Err(e) => warn!(error = %e, "failed to refresh session list, keeping cache"),
        }
    }

    fn show_welcome(&mut self, welcome: &str) {
        self.transcript.push(ChatMessage::now(ChatRole::Bot, welcome));
    }
}
