//! View errors.

use shelf_auth::AuthError;
use shelf_core::form::FormErrors;
use shelf_core::CatalogError;
use shelf_data::FetchError;
use thiserror::Error;

/// Errors surfaced by view actions.
#[derive(Error, Debug)]
pub enum ViewError {
    /// The back office needs a (new) login.
    #[error("login required")]
    LoginRequired,

    /// Form input was rejected; no request was sent.
    #[error("invalid input: {0}")]
    Invalid(FormErrors),

    /// A result arrived for a superseded or torn-down request.
    #[error("stale response discarded")]
    Stale,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Auth(AuthError),
}

impl From<AuthError> for ViewError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::LoginRequired | AuthError::SessionExpired => ViewError::LoginRequired,
            other => ViewError::Auth(other),
        }
    }
}
