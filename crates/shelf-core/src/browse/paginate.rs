//! Paginate stage.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Maximum number of numbered page buttons shown at once.
pub const PAGE_WINDOW: usize = 5;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages. Zero when there are no items.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. `per_page` must be at least one.
    pub fn new(page: usize, per_page: usize, total: usize) -> Result<Self, CatalogError> {
        if per_page == 0 {
            return Err(CatalogError::InvalidPageSize(per_page));
        }
        let page = page.max(1);
        let total_pages = total.div_ceil(per_page);

        Ok(Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        })
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Page numbers for the numbered buttons.
    pub fn page_numbers(&self) -> Vec<usize> {
        page_window(self.page, self.total_pages, PAGE_WINDOW)
    }

    /// Check if on first page.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Check if on or past the last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number (1-indexed), 0 for an empty page.
    pub fn start_item(&self) -> usize {
        if self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        self.page.saturating_mul(self.per_page).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: crate::browse::DEFAULT_PAGE_SIZE,
            total: 0,
            total_pages: 0,
            has_next: false,
            has_prev: false,
        }
    }
}

/// One page of a larger result set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Total number of pages.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    /// The page number this page was requested as.
    pub fn number(&self) -> usize {
        self.pagination.page
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Slice `items` into the 1-based page `page` of size `page_size`.
///
/// Pages past the end yield an empty slice rather than an error.
pub fn paginate<T: Clone>(
    items: &[T],
    page_size: usize,
    page: usize,
) -> Result<Page<T>, CatalogError> {
    let pagination = Pagination::new(page, page_size, items.len())?;
    let start = pagination.offset().min(items.len());
    let end = pagination.end_item().max(start);

    Ok(Page {
        items: items[start..end].to_vec(),
        pagination,
    })
}

/// Page numbers to show as buttons: at most `max_visible`, kept roughly
/// centred on `current` and clamped to `[1, total_pages]`.
pub fn page_window(current: usize, total_pages: usize, max_visible: usize) -> Vec<usize> {
    if total_pages <= max_visible {
        return (1..=total_pages).collect();
    }
    if max_visible == 0 {
        return Vec::new();
    }

    let half = max_visible / 2;
    let current = current.clamp(1, total_pages);
    let start = current.saturating_sub(half).max(1);
    let end = (start + max_visible - 1).min(total_pages);
    let start = (end + 1).saturating_sub(max_visible).max(1);

    (start..=end).collect()
}
