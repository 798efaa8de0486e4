//! Book catalog module.
//!
//! Contains types for catalog items, categories, and the static sample catalog.

mod category;
mod item;
mod sample;

pub use category::{Category, CategoryFilter};
pub use item::{Item, NewItem};
pub use sample::{StaticCatalog, DEALS_LIMIT, FEATURED_LIMIT, FEATURED_MIN_RATING, NEW_ARRIVALS_LIMIT};
