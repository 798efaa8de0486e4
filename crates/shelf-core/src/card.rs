//! Item card presentation model.
//!
//! An [`ItemCard`] is everything a grid cell shows for one item, derived
//! from the item alone. The favorite and cart toggles are local to the
//! card and never persisted.

use crate::catalog::Item;
use crate::ids::ItemId;
use crate::price::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of stars in a rating display.
pub const MAX_STARS: u8 = 5;

/// Badge shown in the corner of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "percent")]
pub enum Badge {
    /// Item is flagged as a new arrival.
    New,
    /// Item is discounted by the given percentage.
    Discount(u8),
}

impl Badge {
    pub fn label(&self) -> String {
        match self {
            Badge::New => "New".to_string(),
            Badge::Discount(pct) => format!("-{}%", pct),
        }
    }

    /// CSS modifier used by the HTML renderer.
    pub fn css_class(&self) -> &'static str {
        match self {
            Badge::New => "badge-new",
            Badge::Discount(_) => "badge-discount",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Star rating out of [`MAX_STARS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingStars {
    pub filled: u8,
}

impl RatingStars {
    /// Whole stars for a rating; a missing rating shows no stars.
    pub fn from_rating(rating: Option<f64>) -> Self {
        let value = rating.unwrap_or(0.0);
        let filled = if value.is_finite() {
            value.floor().clamp(0.0, f64::from(MAX_STARS)) as u8
        } else {
            0
        };
        Self { filled }
    }

    pub fn empty(&self) -> u8 {
        MAX_STARS - self.filled
    }

    /// Text rendering, e.g. `★★★★☆`.
    pub fn glyphs(&self) -> String {
        let mut s = "\u{2605}".repeat(self.filled as usize);
        s.push_str(&"\u{2606}".repeat(self.empty() as usize));
        s
    }
}

/// A rendered-ready card for one catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCard {
    pub id: ItemId,
    pub title: String,
    pub author: String,
    pub cover_image: Option<String>,
    pub badges: Vec<Badge>,
    pub stars: RatingStars,
    pub review_count: u32,
    pub price: Price,
    /// Original price shown struck through next to `price`.
    pub struck_price: Option<Price>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub in_cart: bool,
}

impl ItemCard {
    pub fn from_item(item: &Item) -> Self {
        let mut badges = Vec::new();
        if item.is_new_arrival() {
            badges.push(Badge::New);
        }
        if let Some(pct) = item.discount.filter(|d| *d > 0) {
            badges.push(Badge::Discount(pct));
        }

        let price = item.price();
        let struck_price = item
            .original_price()
            .filter(|orig| orig.amount() != price.amount());

        Self {
            id: item.id,
            title: item.title.clone(),
            author: item.author.clone(),
            cover_image: item.cover_image.clone(),
            badges,
            stars: RatingStars::from_rating(item.rating),
            review_count: item.review_count(),
            price,
            struck_price,
            favorite: false,
            in_cart: false,
        }
    }

    /// Flip the favorite toggle and return the new value.
    pub fn toggle_favorite(&mut self) -> bool {
        self.favorite = !self.favorite;
        self.favorite
    }

    /// Flip the cart toggle and return the new value.
    pub fn toggle_cart(&mut self) -> bool {
        self.in_cart = !self.in_cart;
        self.in_cart
    }

    pub fn filled_stars(&self) -> u8 {
        self.stars.filled
    }

    pub fn has_badge(&self, badge: Badge) -> bool {
        self.badges.contains(&badge)
    }
}

impl From<&Item> for ItemCard {
    fn from(item: &Item) -> Self {
        ItemCard::from_item(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    #[test]
    fn test_discounted_item_shows_struck_price_and_badge() {
        let catalog = StaticCatalog::sample().unwrap();
        let item = catalog.find_by_id(ItemId::new(7)).unwrap();
        let card = ItemCard::from_item(item);

        assert_eq!(card.price.display(), "\u{0e3f}250");
        assert_eq!(card.struck_price.map(|p| p.display()), Some("\u{0e3f}350".to_string()));
        assert!(card.has_badge(Badge::Discount(29)));
        assert_eq!(card.badges[0].label(), "-29%");
    }

    #[test]
    fn test_new_and_discount_badges_co_occur() {
        let item = Item::new(1, "A", "B", 100.0)
            .mark_new()
            .with_discount(120.0, 17);
        let card = ItemCard::from_item(&item);
        assert_eq!(card.badges, vec![Badge::New, Badge::Discount(17)]);
    }

    #[test]
    fn test_plain_item_has_no_badges_or_struck_price() {
        let card = ItemCard::from_item(&Item::new(1, "A", "B", 100.0));
        assert!(card.badges.is_empty());
        assert!(card.struck_price.is_none());
        assert_eq!(card.review_count, 0);
        assert_eq!(card.filled_stars(), 0);
    }

    #[test]
    fn test_zero_discount_has_no_badge() {
        let mut item = Item::new(1, "A", "B", 100.0);
        item.discount = Some(0);
        item.original_price = Some(100.0);
        let card = ItemCard::from_item(&item);
        assert!(card.badges.is_empty());
        assert!(card.struck_price.is_none());
    }

    #[test]
    fn test_stars_floor_and_clamp() {
        assert_eq!(RatingStars::from_rating(Some(4.8)).filled, 4);
        assert_eq!(RatingStars::from_rating(Some(5.0)).filled, 5);
        assert_eq!(RatingStars::from_rating(Some(7.2)).filled, 5);
        assert_eq!(RatingStars::from_rating(Some(-1.0)).filled, 0);
        assert_eq!(RatingStars::from_rating(Some(f64::NAN)).filled, 0);
        assert_eq!(RatingStars::from_rating(Some(3.5)).glyphs(), "★★★☆☆");
    }

    #[test]
    fn test_toggles_start_off_and_flip() {
        let mut card = ItemCard::from_item(&Item::new(1, "A", "B", 100.0));
        assert!(!card.favorite && !card.in_cart);
        assert!(card.toggle_favorite());
        assert!(card.toggle_cart());
        assert!(!card.toggle_favorite());
        assert!(card.in_cart);
    }
}
