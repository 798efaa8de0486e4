//! The back-office login gate.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::{AdminSession, AuthError, CredentialCheck, LocalStore};

/// Store key for the legacy boolean login flag.
pub const LEGACY_FLAG_KEY: &str = "isAdminAuthenticated";
/// Store key for the serialized [`AdminSession`].
pub const SESSION_KEY: &str = "adminSession";

const LEGACY_FLAG_SET: &str = "true";

/// Guards back-office views behind a login.
#[derive(Debug)]
pub struct AuthGate<C> {
    store: LocalStore,
    credentials: C,
    ttl: Duration,
}

impl<C: CredentialCheck> AuthGate<C> {
    pub fn new(store: LocalStore, credentials: C) -> Self {
        Self {
            store,
            credentials,
            ttl: Duration::seconds(AdminSession::DEFAULT_TTL_SECS),
        }
    }

    /// Set the session lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The current session, if one exists and has not expired.
    pub fn check(&mut self) -> Result<AdminSession, AuthError> {
        self.check_at(Utc::now())
    }

    pub fn check_at(&mut self, now: DateTime<Utc>) -> Result<AdminSession, AuthError> {
        let Some(session) = self.store.get::<AdminSession>(SESSION_KEY) else {
            debug!("no admin session");
            return Err(AuthError::LoginRequired);
        };
        if session.is_expired_at(now) {
            info!(username = %session.username, "admin session expired");
            self.clear()?;
            return Err(AuthError::LoginRequired);
        }
        Ok(session)
    }

    /// Verify credentials and persist a fresh session.
    pub fn login(&mut self, username: &str, password: &str) -> Result<AdminSession, AuthError> {
        self.login_at(username, password, Utc::now())
    }

    pub fn login_at(
        &mut self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<AdminSession, AuthError> {
        if !self.credentials.verify(username, password)? {
            warn!(username, "admin login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        let session = AdminSession::issue_at(username, self.ttl, now);
        self.store.set(SESSION_KEY, &session)?;
        self.store.set_raw(LEGACY_FLAG_KEY, LEGACY_FLAG_SET)?;
        info!(username, expires_at = %session.expires_at, "admin logged in");
        Ok(session)
    }

    /// Remove the session and the legacy flag.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.clear()?;
        info!("admin logged out");
        Ok(())
    }

    /// Whether the legacy flag holds the literal `"true"`.
    pub fn legacy_flag_set(&self) -> bool {
        self.store.get_raw(LEGACY_FLAG_KEY) == Some(LEGACY_FLAG_SET)
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    fn clear(&mut self) -> Result<(), AuthError> {
        self.store.remove(SESSION_KEY)?;
        self.store.remove(LEGACY_FLAG_KEY)
    }
}
