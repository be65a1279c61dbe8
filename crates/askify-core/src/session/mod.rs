//! Session domain module.
//!
//! This module contains the session data model, the session-worthiness
//! classifier, the remote store interface, and the lifecycle controller.
//!
//! # Module Structure
//!
//! - `message`: Chat message types (`ChatRole`, `ChatMessage`)
//! - `model`: Session models (`SessionSummary`, `ActiveSession`)
//! - `classifier`: Keyword predicate deciding whether a message is session-worthy
//! - `store`: Remote session-store trait (`SessionStore`)
//! - `controller`: Session lifecycle orchestration (`SessionLifecycleController`)

mod classifier;
mod controller;
mod message;
mod model;
mod store;

pub use classifier::is_session_worthy;
pub use controller::{SessionLifecycleController, SubmitOutcome};
pub use message::{ChatMessage, ChatRole, now_time};
pub use model::{ActiveSession, SessionSummary};
pub use store::SessionStore;
