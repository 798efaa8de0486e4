//! Back-office authentication for the Bookshelf storefront.
//!
//! The gate is a convenience for the admin pages, not a security boundary:
//! the catalog service does not check credentials itself.

mod credentials;
mod error;
mod gate;
mod session;
mod store;

pub use credentials::*;
pub use error::*;
pub use gate::*;
pub use session::*;
pub use store::*;
