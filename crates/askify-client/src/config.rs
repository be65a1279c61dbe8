//! Backend connection configuration.

use std::env;

const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Everything the HTTP clients need to reach the backend.
///
/// The user email rides along on every request as the `X-User-Email` header;
/// identity itself comes from the externally managed login flow (see
/// `profile::UserProfile`).
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the Askify backend, without a trailing slash.
    pub api_base: String,
    /// Email identifying the user on every request.
    pub user_email: String,
}

impl BackendConfig {
    /// Creates a config for the given user, reading the base URL from the
    /// `ASKIFY_API_BASE` environment variable when set and falling back to
    /// the default local backend.
    pub fn for_user(user_email: impl Into<String>) -> Self {
        let api_base = env::var("ASKIFY_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(api_base, user_email)
    }

    /// Creates a config with an explicit base URL.
    pub fn new(api_base: impl Into<String>, user_email: impl Into<String>) -> Self {
        let mut api_base = api_base.into();
        while api_base.ends_with('/') {
            api_base.pop();
        }
        Self {
            api_base,
            user_email: user_email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = BackendConfig::new("http://example.com/", "a@b.c");
        assert_eq!(config.api_base, "http://example.com");
    }

    #[test]
    fn default_base_points_at_local_backend() {
        assert_eq!(DEFAULT_API_BASE, "http://localhost:5000");
    }
}
