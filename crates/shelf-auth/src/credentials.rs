//! Credential checking.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::AuthError;

/// Username accepted when nothing is configured.
pub const DEFAULT_ADMIN_USERNAME: &str = "bookstoreadmin";
/// Password accepted when nothing is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "ManageBook68";

/// Decides whether a username/password pair may log in.
pub trait CredentialCheck: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError>;
}

/// A single plain-text credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
    }
}

impl CredentialCheck for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        Ok(constant_time_eq(username.as_bytes(), self.username.as_bytes())
            & constant_time_eq(password.as_bytes(), self.password.as_bytes()))
    }
}

/// A username plus an Argon2 PHC-format password hash.
#[derive(Debug, Clone)]
pub struct Argon2Credentials {
    username: String,
    password_hash: String,
}

impl Argon2Credentials {
    /// Create from a stored hash. The hash is parsed up front so a bad
    /// config fails at startup rather than at login.
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let password_hash = password_hash.into();
        PasswordHash::new(&password_hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;
        Ok(Self {
            username: username.into(),
            password_hash,
        })
    }

    /// Hash a password for storing in config.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswordHash(e.to_string()))
    }
}

impl CredentialCheck for Argon2Credentials {
    fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if !constant_time_eq(username.as_bytes(), self.username.as_bytes()) {
            return Ok(false);
        }
        let parsed = PasswordHash::new(&self.password_hash)
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
