//! View controllers for the Bookshelf storefront and back office.
//!
//! Each view owns its in-memory state and a request generation. Fetch
//! results are applied only while their ticket is current, so a response
//! that arrives after a newer request (or after `close()`) is dropped.
//!
//! The [`sections`] module renders view state to HTML fragments.

mod error;
mod state;

pub mod sections;
pub mod views;

pub use error::ViewError;
pub use state::{DetailState, LoadState, SubmitState, DELETE_ERROR, LOAD_ERROR, SAVE_ERROR};
pub use views::*;

use shelf_data::CatalogApi;
use std::sync::Arc;

/// Catalog handle shared between views.
pub type SharedCatalog = Arc<dyn CatalogApi>;
