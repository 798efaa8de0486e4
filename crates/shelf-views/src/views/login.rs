//! Back-office login view.

use shelf_auth::{AdminSession, AuthError, AuthGate, CredentialCheck};

use crate::sections::render_login_form;
use crate::ViewError;

/// Shown for any rejected login.
pub const LOGIN_ERROR: &str = "Invalid username or password";

/// The session for a back-office page, or `ViewError::LoginRequired` when
/// the caller must show the login view first.
pub fn require_admin<C: CredentialCheck>(
    gate: &mut AuthGate<C>,
) -> Result<AdminSession, ViewError> {
    gate.check().map_err(ViewError::from)
}

/// Login form bound to a gate.
pub struct LoginView<'a, C> {
    gate: &'a mut AuthGate<C>,
    username: String,
    error: Option<String>,
}

impl<'a, C: CredentialCheck> LoginView<'a, C> {
    pub fn new(gate: &'a mut AuthGate<C>) -> Self {
        Self {
            gate,
            username: String::new(),
            error: None,
        }
    }

    /// Try to log in. On failure the username is kept and a generic error
    /// is shown.
    pub fn submit(&mut self, username: &str, password: &str) -> Result<AdminSession, ViewError> {
        self.username = username.to_string();
        match self.gate.login(username, password) {
            Ok(session) => {
                self.error = None;
                Ok(session)
            }
            Err(AuthError::InvalidCredentials) => {
                self.error = Some(LOGIN_ERROR.to_string());
                Err(ViewError::Auth(AuthError::InvalidCredentials))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn render(&self) -> String {
        render_login_form(&self.username, self.error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_auth::{LocalStore, StaticCredentials};

    fn gate() -> AuthGate<StaticCredentials> {
        AuthGate::new(LocalStore::in_memory(), StaticCredentials::default())
    }

    #[test]
    fn test_require_admin_redirects_without_session() {
        let mut gate = gate();
        assert!(matches!(
            require_admin(&mut gate),
            Err(ViewError::LoginRequired)
        ));
    }

    #[test]
    fn test_login_then_require_admin() {
        let mut gate = gate();
        {
            let mut view = LoginView::new(&mut gate);
            assert!(view.submit("bookstoreadmin", "wrong").is_err());
            assert_eq!(view.error(), Some(LOGIN_ERROR));
            assert!(view.render().contains(LOGIN_ERROR));

            view.submit("bookstoreadmin", "ManageBook68").unwrap();
            assert!(view.error().is_none());
        }
        let session = require_admin(&mut gate).unwrap();
        assert_eq!(session.username, "bookstoreadmin");
    }
}
