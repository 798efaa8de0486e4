//! Catalog item types.

use crate::ids::ItemId;
use crate::price::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A book in the catalog.
///
/// Merchandising fields are optional: the catalog service only sends them
/// when they apply (a discount, a "new" flag, review data).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier assigned by the catalog source.
    pub id: ItemId,
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Category slug (open enumeration, e.g. "fiction").
    #[serde(default)]
    pub category: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Current selling price.
    pub price: f64,
    /// Price before discount, present only when a discount applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Discount percentage (0-100), trusted as supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
    /// Whether the item is flagged as a new arrival.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    /// Average rating in [0, 5].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of reviews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    /// ISBN (digits and hyphens).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    /// Publication year. Negative for BCE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Page count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    /// Language of this edition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Publisher name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Server-side creation time.
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Server-side last update time.
    #[serde(default, alias = "updated_at", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Create an item with only the required fields set.
    pub fn new(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        author: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            category: String::new(),
            description: String::new(),
            price,
            original_price: None,
            discount: None,
            is_new: None,
            rating: None,
            reviews: None,
            isbn: None,
            year: None,
            pages: None,
            language: None,
            publisher: None,
            cover_image: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the review count.
    pub fn with_reviews(mut self, reviews: u32) -> Self {
        self.reviews = Some(reviews);
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Mark as discounted from an original price.
    pub fn with_discount(mut self, original_price: f64, discount: u8) -> Self {
        self.original_price = Some(original_price);
        self.discount = Some(discount);
        self
    }

    /// Flag as a new arrival.
    pub fn mark_new(mut self) -> Self {
        self.is_new = Some(true);
        self
    }

    /// Current selling price.
    pub fn price(&self) -> Price {
        Price::new(self.price)
    }

    /// Original price, if the item is discounted.
    pub fn original_price(&self) -> Option<Price> {
        self.original_price.map(Price::new)
    }

    /// Review count, treating a missing count as zero.
    pub fn review_count(&self) -> u32 {
        self.reviews.unwrap_or(0)
    }

    /// Whether the item is flagged as new.
    pub fn is_new_arrival(&self) -> bool {
        self.is_new.unwrap_or(false)
    }

    /// Whether a non-zero discount applies.
    pub fn has_discount(&self) -> bool {
        self.discount.is_some_and(|d| d > 0)
    }

    /// Case-insensitive substring match on title or author.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }

    /// Case-insensitive category equality.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// Payload for creating a catalog item from the back-office form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewItem {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: i32,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_wire_format_is_camel_case() {
        let item = Item::new(7, "The Art of War", "Sun Tzu", 250.0)
            .with_category("history")
            .with_discount(350.0, 29);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["originalPrice"], 350.0);
        assert_eq!(json["discount"], 29);
        assert!(json.get("isNew").is_none());
    }

    #[test]
    fn test_item_from_server_payload() {
        let payload = r#"{
            "id": 3,
            "title": "Go in Action",
            "author": "William Kennedy",
            "isbn": "978-1617291784",
            "year": 2015,
            "price": 1200.5,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-02T10:00:00Z"
        }"#;
        let item: Item = serde_json::from_str(payload).unwrap();
        assert_eq!(item.id, ItemId::new(3));
        assert_eq!(item.category, "");
        assert_eq!(item.year, Some(2015));
        assert!(item.created_at.is_some());
        assert_eq!(item.review_count(), 0);
        assert!(!item.is_new_arrival());
    }

    #[test]
    fn test_matches_text() {
        let item = Item::new(1, "Clean Code", "Robert C. Martin", 580.0);
        assert!(item.matches_text("clean"));
        assert!(item.matches_text("martin"));
        assert!(!item.matches_text("rust"));
    }

    #[test]
    fn test_in_category_ignores_case() {
        let item = Item::new(1, "1984", "George Orwell", 350.0).with_category("Fiction");
        assert!(item.in_category("fiction"));
        assert!(!item.in_category("history"));
    }

    #[test]
    fn test_new_item_body() {
        let body = NewItem {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "978-0441172719".to_string(),
            year: 1965,
            price: 450.0,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["year"], 1965);
        assert_eq!(json["isbn"], "978-0441172719");
    }
}
