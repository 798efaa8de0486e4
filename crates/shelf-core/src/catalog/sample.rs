//! In-memory catalog, seeded from the bundled sample data.

use crate::catalog::{Item, NewItem};
use crate::error::CatalogError;
use crate::ids::ItemId;

/// Minimum rating for an item to be featured.
pub const FEATURED_MIN_RATING: f64 = 4.5;
/// Default number of featured items.
pub const FEATURED_LIMIT: usize = 3;
/// Default number of new arrivals.
pub const NEW_ARRIVALS_LIMIT: usize = 4;
/// Default number of discounted items.
pub const DEALS_LIMIT: usize = 4;

const SAMPLE_CATALOG: &str = include_str!("../../data/sample_catalog.json");

/// A catalog held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticCatalog {
    items: Vec<Item>,
}

impl StaticCatalog {
    /// Load the bundled sample catalog.
    pub fn sample() -> Result<Self, CatalogError> {
        let items: Vec<Item> = serde_json::from_str(SAMPLE_CATALOG)?;
        Ok(Self { items })
    }

    /// Create a catalog from existing items.
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// All items in source order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find an item by ID.
    pub fn find_by_id(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Highly rated items, in source order.
    pub fn featured(&self, limit: usize) -> Vec<Item> {
        self.items
            .iter()
            .filter(|i| i.rating.is_some_and(|r| r >= FEATURED_MIN_RATING))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Items flagged as new, in source order.
    pub fn new_arrivals(&self, limit: usize) -> Vec<Item> {
        self.items
            .iter()
            .filter(|i| i.is_new_arrival())
            .take(limit)
            .cloned()
            .collect()
    }

    /// Discounted items, biggest discount first.
    pub fn deals(&self, limit: usize) -> Vec<Item> {
        let mut deals: Vec<Item> = self
            .items
            .iter()
            .filter(|i| i.has_discount())
            .cloned()
            .collect();
        deals.sort_by(|a, b| b.discount.unwrap_or(0).cmp(&a.discount.unwrap_or(0)));
        deals.truncate(limit);
        deals
    }

    /// Add an item, assigning the next free ID.
    pub fn insert(&mut self, new_item: &NewItem) -> Item {
        let next_id = self.items.iter().map(|i| i.id.get()).max().unwrap_or(0) + 1;
        let mut item = Item::new(
            next_id,
            new_item.title.clone(),
            new_item.author.clone(),
            new_item.price,
        );
        item.isbn = Some(new_item.isbn.clone());
        item.year = Some(new_item.year);
        self.items.push(item.clone());
        item
    }

    /// Remove an item by ID.
    pub fn remove(&mut self, id: ItemId) -> Result<Item, CatalogError> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(CatalogError::ItemNotFound(id))?;
        Ok(self.items.remove(pos))
    }
}
