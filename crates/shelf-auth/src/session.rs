//! Admin session.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// A logged-in back-office session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    /// Random opaque token.
    pub token: String,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// Default session lifetime: 8 hours.
    pub const DEFAULT_TTL_SECS: i64 = 8 * 60 * 60;

    /// Issue a session starting now.
    pub fn issue(username: impl Into<String>, ttl: Duration) -> Self {
        Self::issue_at(username, ttl, Utc::now())
    }

    /// Issue a session starting at `now`.
    pub fn issue_at(username: impl Into<String>, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            token: generate_token(),
            username: username.into(),
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Validate the session, returning error if expired.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        if self.is_expired_at(now) {
            Err(AuthError::SessionExpired)
        } else {
            Ok(())
        }
    }

    /// Time until expiration, zero once expired.
    pub fn time_to_expiry_at(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}

/// 32 random bytes, URL-safe base64.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = AdminSession::issue_at("admin", Duration::minutes(30), now);

        assert!(!session.is_expired_at(now));
        assert!(session.validate_at(now + Duration::minutes(29)).is_ok());
        assert!(session.is_expired_at(now + Duration::minutes(30)));
        assert!(matches!(
            session.validate_at(now + Duration::hours(1)),
            Err(AuthError::SessionExpired)
        ));
        assert_eq!(
            session.time_to_expiry_at(now + Duration::hours(1)),
            Duration::zero()
        );
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = AdminSession::issue("admin", Duration::hours(1));
        let b = AdminSession::issue("admin", Duration::hours(1));
        assert_ne!(a.token, b.token);
        assert_eq!(a.token.len(), 43);
    }

    #[test]
    fn test_wire_format() {
        let session = AdminSession::issue("admin", Duration::hours(1));
        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("expiresAt").is_some());
        let back: AdminSession = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }
}
