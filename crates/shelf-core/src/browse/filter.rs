//! Filter stage.

use crate::catalog::{CategoryFilter, Item};
use serde::{Deserialize, Serialize};

/// Predicates applied to the source set.
///
/// Text query and category compose: an item must satisfy both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text query matched against title and author.
    pub query: String,
    /// Category restriction.
    pub category: CategoryFilter,
}

impl FilterCriteria {
    /// Create empty criteria (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// The query, trimmed and lowercased, or `None` when blank.
    fn needle(&self) -> Option<String> {
        let q = self.query.trim();
        if q.is_empty() {
            None
        } else {
            Some(q.to_lowercase())
        }
    }

    /// Whether these criteria let every item through.
    pub fn is_identity(&self) -> bool {
        self.needle().is_none() && self.category.is_all()
    }

    /// Check a single item.
    pub fn matches(&self, item: &Item) -> bool {
        self.matches_with(item, self.needle().as_deref())
    }

    fn matches_with(&self, item: &Item, needle: Option<&str>) -> bool {
        let text_ok = needle.map_or(true, |n| item.matches_text(n));
        let category_ok = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => item.in_category(c),
        };
        text_ok && category_ok
    }
}

/// Narrow `items` to those matching `criteria`, preserving order.
pub fn filter(items: &[Item], criteria: &FilterCriteria) -> Vec<Item> {
    if criteria.is_identity() {
        return items.to_vec();
    }
    let needle = criteria.needle();
    items
        .iter()
        .filter(|item| criteria.matches_with(item, needle.as_deref()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    fn ids(items: &[Item]) -> Vec<i64> {
        items.iter().map(|i| i.id.get()).collect()
    }

    #[test]
    fn test_category_all_is_identity() {
        let catalog = StaticCatalog::sample().unwrap();
        let criteria = FilterCriteria::new().with_category(CategoryFilter::parse("all"));
        assert_eq!(filter(catalog.items(), &criteria), catalog.items().to_vec());
    }

    #[test]
    fn test_empty_query_is_identity() {
        let catalog = StaticCatalog::sample().unwrap();
        let criteria = FilterCriteria::new().with_query("");
        assert_eq!(filter(catalog.items(), &criteria), catalog.items().to_vec());

        let blank = FilterCriteria::new().with_query("   ");
        assert_eq!(filter(catalog.items(), &blank).len(), catalog.len());
    }

    #[test]
    fn test_query_matches_title_or_author() {
        let catalog = StaticCatalog::sample().unwrap();
        let by_title = filter(catalog.items(), &FilterCriteria::new().with_query("HABITS"));
        assert_eq!(ids(&by_title), vec![11, 12]);

        let by_author = filter(catalog.items(), &FilterCriteria::new().with_query("orwell"));
        assert_eq!(ids(&by_author), vec![2]);
    }

    #[test]
    fn test_category_filter() {
        let catalog = StaticCatalog::sample().unwrap();
        let criteria = FilterCriteria::new().with_category(CategoryFilter::parse("Psychology"));
        assert_eq!(ids(&filter(catalog.items(), &criteria)), vec![6, 10, 11, 13]);
    }

    #[test]
    fn test_query_and_category_compose() {
        let catalog = StaticCatalog::sample().unwrap();
        let criteria = FilterCriteria::new()
            .with_query("the")
            .with_category(CategoryFilter::parse("business"));
        // "The Lean Startup" and "The 7 Habits..." are business; "The Alchemist" is not.
        assert_eq!(ids(&filter(catalog.items(), &criteria)), vec![9, 12]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let catalog = StaticCatalog::sample().unwrap();
        let criteria = FilterCriteria::new().with_query("zzzz");
        assert!(filter(catalog.items(), &criteria).is_empty());
    }

    #[test]
    fn test_matches_agrees_with_filter() {
        let catalog = StaticCatalog::sample().unwrap();
        let criteria = FilterCriteria::new()
            .with_query("an")
            .with_category(CategoryFilter::parse("fiction"));
        let expected: Vec<Item> = catalog
            .items()
            .iter()
            .filter(|i| criteria.matches(i))
            .cloned()
            .collect();
        assert_eq!(filter(catalog.items(), &criteria), expected);
    }
}
