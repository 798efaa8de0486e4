//! Browse session state.

use tracing::debug;

use crate::browse::{
    filter, page_window, paginate, sort, FilterCriteria, Page, Pagination, SortKey, PAGE_WINDOW,
};
use crate::catalog::{CategoryFilter, Item};
use crate::error::CatalogError;

/// Items per page on the catalog list.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// The in-memory state of one catalog browsing session.
///
/// Query, category and sort are held independently. The working set is
/// always `sort(filter(source, query, category), sort)`, so the result never
/// depends on the order in which the user changed them.
#[derive(Debug, Clone)]
pub struct BrowseState {
    source: Vec<Item>,
    criteria: FilterCriteria,
    sort: SortKey,
    current_page: usize,
    page_size: usize,
    working: Vec<Item>,
}

impl BrowseState {
    /// Create a session over `source` with default selections.
    pub fn new(source: Vec<Item>) -> Self {
        let mut state = Self {
            source,
            criteria: FilterCriteria::default(),
            sort: SortKey::default(),
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            working: Vec::new(),
        };
        state.recompute();
        state
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Result<Self, CatalogError> {
        if page_size == 0 {
            return Err(CatalogError::InvalidPageSize(page_size));
        }
        self.page_size = page_size;
        Ok(self)
    }

    /// Replace the source set (e.g. after a fetch completes).
    pub fn set_source(&mut self, source: Vec<Item>) {
        self.source = source;
        self.current_page = 1;
        self.recompute();
    }

    /// Issue a text search. Resets to page 1.
    pub fn search(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
        self.current_page = 1;
        self.recompute();
    }

    /// Select a category. Resets to page 1.
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.criteria.category = category;
        self.current_page = 1;
        self.recompute();
    }

    /// Select a sort key. Keeps the current page.
    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
        self.recompute();
    }

    /// Jump to a page, clamped to the available pages.
    pub fn go_to(&mut self, page: usize) {
        let last = self.total_pages().max(1);
        self.current_page = page.clamp(1, last);
    }

    /// Move to the next page. Returns `false` (no-op) on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous page. Returns `false` (no-op) on page 1.
    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    fn recompute(&mut self) {
        let filtered = filter(&self.source, &self.criteria);
        self.working = sort(&filtered, self.sort);
        debug!(
            source = self.source.len(),
            working = self.working.len(),
            query = %self.criteria.query,
            category = %self.criteria.category,
            sort = %self.sort,
            "recomputed working set"
        );
    }

    /// The full source set.
    pub fn source_items(&self) -> &[Item] {
        &self.source
    }

    /// The filtered and sorted set.
    pub fn working_items(&self) -> &[Item] {
        &self.working
    }

    /// The items on the current page.
    pub fn current_page_items(&self) -> Page<Item> {
        paginate(&self.working, self.page_size, self.current_page).unwrap_or_else(|_| Page {
            items: Vec::new(),
            pagination: Pagination::default(),
        })
    }

    /// Page numbers for the numbered buttons.
    pub fn page_window(&self) -> Vec<usize> {
        page_window(self.current_page, self.total_pages(), PAGE_WINDOW)
    }

    pub fn total_pages(&self) -> usize {
        self.working.len().div_ceil(self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn query(&self) -> &str {
        &self.criteria.query
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.criteria.category
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Whether the working set is empty ("no results").
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Results summary line, e.g. "Found 4 books in category psychology".
    pub fn summary(&self) -> String {
        let noun = if self.working.len() == 1 { "book" } else { "books" };
        match &self.criteria.category {
            CategoryFilter::All => format!("Found {} {}", self.working.len(), noun),
            CategoryFilter::Only(c) => {
                format!("Found {} {} in category {}", self.working.len(), noun, c)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    fn sample_state() -> BrowseState {
        BrowseState::new(StaticCatalog::sample().unwrap().items().to_vec())
    }

    fn ids(items: &[Item]) -> Vec<i64> {
        items.iter().map(|i| i.id.get()).collect()
    }

    #[test]
    fn test_default_is_newest_first() {
        let state = sample_state();
        assert_eq!(state.sort_key(), SortKey::Newest);
        assert_eq!(state.working_items()[0].id.get(), 15);
        assert_eq!(state.total_pages(), 2);
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = sample_state();
        assert!(state.next_page());
        assert_eq!(state.current_page(), 2);

        state.search("the");
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_category_resets_page_but_sort_does_not() {
        let mut state = sample_state();
        state.go_to(2);
        state.set_sort(SortKey::PriceLow);
        assert_eq!(state.current_page(), 2);

        state.set_category(CategoryFilter::parse("fiction"));
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_result_is_independent_of_action_order() {
        let mut a = sample_state();
        a.set_sort(SortKey::PriceHigh);
        a.set_category(CategoryFilter::parse("psychology"));

        let mut b = sample_state();
        b.set_category(CategoryFilter::parse("psychology"));
        b.set_sort(SortKey::PriceHigh);

        assert_eq!(ids(a.working_items()), ids(b.working_items()));
        assert_eq!(ids(a.working_items()), vec![6, 11, 13, 10]);
    }

    #[test]
    fn test_search_keeps_category() {
        let mut state = sample_state();
        state.set_category(CategoryFilter::parse("fiction"));
        state.search("orwell");
        assert_eq!(ids(state.working_items()), vec![2]);
        assert_eq!(state.summary(), "Found 1 book in category fiction");
    }

    #[test]
    fn test_navigation_boundaries() {
        let mut state = sample_state();
        assert!(!state.prev_page());
        assert!(state.next_page());
        assert!(!state.next_page());
        assert_eq!(state.current_page(), 2);
        assert_eq!(state.current_page_items().len(), 3);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut state = sample_state();
        state.go_to(99);
        assert_eq!(state.current_page(), 2);
        state.go_to(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_no_results() {
        let mut state = sample_state();
        state.search("no such book");
        assert!(state.is_empty());
        assert_eq!(state.total_pages(), 0);
        assert!(state.current_page_items().is_empty());
        assert!(!state.next_page());
        assert_eq!(state.summary(), "Found 0 books");
    }

    #[test]
    fn test_custom_page_size() {
        let state = sample_state().with_page_size(4).unwrap();
        assert_eq!(state.total_pages(), 4);
        assert_eq!(state.page_window(), vec![1, 2, 3, 4]);
        assert!(sample_state().with_page_size(0).is_err());
    }
}
