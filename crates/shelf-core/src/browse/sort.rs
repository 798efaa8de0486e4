//! Sort stage.

use crate::catalog::Item;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort options for the catalog list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Highest ID first.
    #[default]
    Newest,
    /// Sort by price, low to high.
    PriceLow,
    /// Sort by price, high to low.
    PriceHigh,
    /// Most reviewed first.
    Popular,
}

impl SortKey {
    /// All keys in menu order.
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Popular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Popular => "popular",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Newest => "Newest",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Popular => "Most Popular",
        }
    }

    /// Compare two items under this key. Ties compare equal so a stable
    /// sort keeps their incoming order.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        match self {
            SortKey::Newest => b.id.cmp(&a.id),
            SortKey::PriceLow => a.price().total_cmp(&b.price()),
            SortKey::PriceHigh => b.price().total_cmp(&a.price()),
            SortKey::Popular => b.review_count().cmp(&a.review_count()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or(CatalogError::InvalidSortKey(s))
    }
}

/// Return `items` reordered by `key`. The sort is stable.
pub fn sort(items: &[Item], key: SortKey) -> Vec<Item> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}
