//! Catalog domain types and the browse pipeline for the Bookshelf storefront.
//!
//! This crate provides the client-side logic of the storefront:
//!
//! - **Catalog**: Items, categories, the static sample catalog
//! - **Browse**: Filter, sort and paginate stages plus the browse state
//! - **Card**: Presentation model for a single item card
//! - **Form**: Validation for the back-office add-item form
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_core::prelude::*;
//!
//! let catalog = StaticCatalog::sample()?;
//! let mut state = BrowseState::new(catalog.items().to_vec());
//!
//! state.set_category(CategoryFilter::parse("psychology"));
//! state.set_sort(SortKey::Popular);
//!
//! let page = state.current_page_items();
//! println!("{} of {} pages", page.page, page.total_pages);
//! ```

pub mod error;
pub mod ids;
pub mod price;

pub mod browse;
pub mod card;
pub mod catalog;
pub mod form;

pub use error::CatalogError;
pub use ids::ItemId;
pub use price::Price;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::ItemId;
    pub use crate::price::Price;

    // Catalog
    pub use crate::catalog::{Category, CategoryFilter, Item, NewItem, StaticCatalog};

    // Browse
    pub use crate::browse::{
        filter, page_window, paginate, sort, BrowseState, FilterCriteria, Page, SortKey,
        DEFAULT_PAGE_SIZE, PAGE_WINDOW,
    };

    // Presentation
    pub use crate::card::{Badge, ItemCard, RatingStars};

    // Back-office form
    pub use crate::form::{AddItemForm, FormErrors, FormField};
}
