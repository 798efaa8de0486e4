//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Invalid credentials provided.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// No valid admin session; the caller should show the login screen.
    #[error("login required")]
    LoginRequired,

    /// Session expired.
    #[error("session expired")]
    SessionExpired,

    /// Configured password hash could not be parsed or produced.
    #[error("password hash error: {0}")]
    PasswordHash(String),

    /// Local store could not be read or written.
    #[error("store error: {0}")]
    Store(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::LoginRequired | AuthError::SessionExpired
        )
    }
}
