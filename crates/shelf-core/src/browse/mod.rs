//! Browse module.
//!
//! The catalog-list pipeline: `source -> filter -> sort -> paginate`.
//! Every stage is a pure function over item slices; [`BrowseState`] holds
//! the user's selections and recomputes the working set from the full
//! source whenever one of them changes.

mod filter;
mod paginate;
mod sort;
mod state;

pub use filter::{filter, FilterCriteria};
pub use paginate::{page_window, paginate, Page, Pagination, PAGE_WINDOW};
pub use sort::{sort, SortKey};
pub use state::{BrowseState, DEFAULT_PAGE_SIZE};
