//! Category types for catalog organization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// A known catalog category.
///
/// Categories are an open enumeration on the wire; items may carry slugs
/// outside this list and still filter correctly through [`CategoryFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Fiction,
    NonFiction,
    Science,
    History,
    Art,
    Psychology,
    Business,
    Technology,
    Cooking,
}

impl Category {
    /// All known categories in menu order.
    pub const ALL: [Category; 9] = [
        Category::Fiction,
        Category::NonFiction,
        Category::Science,
        Category::History,
        Category::Art,
        Category::Psychology,
        Category::Business,
        Category::Technology,
        Category::Cooking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fiction => "fiction",
            Category::NonFiction => "non-fiction",
            Category::Science => "science",
            Category::History => "history",
            Category::Art => "art",
            Category::Psychology => "psychology",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Cooking => "cooking",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Fiction => "Fiction",
            Category::NonFiction => "Non-fiction",
            Category::Science => "Science",
            Category::History => "History",
            Category::Art => "Art",
            Category::Psychology => "Psychology",
            Category::Business => "Business",
            Category::Technology => "Technology",
            Category::Cooking => "Cooking",
        }
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(CatalogError::UnknownCategory(s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The active category selection of a browse session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,
    /// Only items whose category equals this slug (case-insensitive).
    Only(String),
}

impl CategoryFilter {
    /// Parse a menu value. `"all"` and the empty string select everything.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    /// Whether this filter lets every item through.
    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    /// The slug used in menus and query strings.
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(c: Category) -> Self {
        CategoryFilter::Only(c.as_str().to_string())
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
        assert_eq!("Non-Fiction".parse::<Category>().unwrap(), Category::NonFiction);
        assert!(matches!(
            "poetry".parse::<Category>(),
            Err(CatalogError::UnknownCategory(slug)) if slug == "poetry"
        ));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("poetry"),
            CategoryFilter::Only("poetry".to_string())
        );
    }

    #[test]
    fn test_filter_from_category() {
        let filter: CategoryFilter = Category::History.into();
        assert_eq!(filter.as_str(), "history");
        assert!(!filter.is_all());
    }
}
