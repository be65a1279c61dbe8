//! Remote clients and local storage for the Askify backend.
//!
//! This crate provides the reqwest-backed implementations of the
//! `askify-core` client traits (`SessionStore`, `ReplyService`) plus the
//! locally persisted user profile and preferences.

pub mod config;
pub mod http_reply;
pub mod http_store;
pub mod profile;

pub use config::BackendConfig;
pub use http_reply::HttpReplyService;
pub use http_store::HttpSessionStore;
pub use profile::{ConfigStore, Prefs, Theme, UserProfile};
