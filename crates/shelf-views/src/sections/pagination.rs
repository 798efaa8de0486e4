//! Pagination controls.

use shelf_core::browse::{page_window, FilterCriteria, SortKey, PAGE_WINDOW};

use super::urlencoding_encode;

/// Render the pagination nav for `current` of `total_pages`.
///
/// Nothing is rendered when everything fits on one page.
pub fn render_pagination(
    current: usize,
    total_pages: usize,
    criteria: &FilterCriteria,
    sort: SortKey,
) -> String {
    if total_pages <= 1 {
        return String::new();
    }

    let base_url = format!(
        "/books?q={}&category={}&sort={}",
        urlencoding_encode(criteria.query.trim()),
        urlencoding_encode(criteria.category.as_str()),
        sort.as_str()
    );

    let pages_html: String = page_window(current, total_pages, PAGE_WINDOW)
        .into_iter()
        .map(|p| {
            if p == current {
                format!(
                    r#"<span class="pagination-page current" aria-current="page">{}</span>"#,
                    p
                )
            } else {
                format!(
                    r#"<a href="{}&page={}" class="pagination-page">{}</a>"#,
                    base_url, p, p
                )
            }
        })
        .collect();

    let prev_link = if current > 1 {
        format!(
            r#"<a href="{}&page={}" class="pagination-prev" aria-label="Previous page">&larr; Prev</a>"#,
            base_url,
            current - 1
        )
    } else {
        r#"<span class="pagination-prev disabled">&larr; Prev</span>"#.to_string()
    };

    let next_link = if current < total_pages {
        format!(
            r#"<a href="{}&page={}" class="pagination-next" aria-label="Next page">Next &rarr;</a>"#,
            base_url,
            current + 1
        )
    } else {
        r#"<span class="pagination-next disabled">Next &rarr;</span>"#.to_string()
    };

    format!(
        r#"<nav class="pagination" aria-label="Catalog pagination">
    {}
    <div class="pagination-pages">
        {}
    </div>
    {}
</nav>"#,
        prev_link, pages_html, next_link
    )
}
