//! Error types for the Askify client.

use thiserror::Error;

/// Failure of a remote session-store operation.
///
/// Store clients normalize every failure into one of these variants instead
/// of panicking or bubbling raw transport errors, so the lifecycle controller
/// can decide per operation whether to abort the user-visible flow or
/// continue degraded.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// Network-level failure (connection refused, timeout, DNS).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered but the body could not be decoded.
    #[error("malformed response: {0}")]
    BadResponse(String),

    /// The server answered with a non-success status.
    #[error("request rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
}

impl StoreError {
    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a BadResponse error
    pub fn bad_response(message: impl Into<String>) -> Self {
        Self::BadResponse(message.into())
    }

    /// Creates a Rejected error
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            body: body.into(),
        }
    }

    /// Check if this is a transport-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// A type alias for `Result<T, StoreError>`.
pub type Result<T> = std::result::Result<T, StoreError>;
