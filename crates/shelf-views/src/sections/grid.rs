//! Catalog grid section with its search, category and sort controls.

use shelf_core::browse::{FilterCriteria, SortKey};
use shelf_core::card::ItemCard;
use shelf_core::catalog::{Category, CategoryFilter};

use super::{html_escape, render_item_card};

/// Render the search box and the category and sort selectors.
pub fn render_browse_controls(criteria: &FilterCriteria, sort: SortKey) -> String {
    let all_selected = if criteria.category.is_all() {
        " selected"
    } else {
        ""
    };
    let category_html: String = Category::ALL
        .iter()
        .map(|c| {
            let selected = match &criteria.category {
                CategoryFilter::Only(name) if name.eq_ignore_ascii_case(c.as_str()) => " selected",
                _ => "",
            };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                c.as_str(),
                selected,
                c.display_name()
            )
        })
        .collect();

    let sort_html: String = SortKey::ALL
        .iter()
        .map(|key| {
            let selected = if *key == sort { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                key.as_str(),
                selected,
                key.display_name()
            )
        })
        .collect();

    format!(
        r#"<section class="browse-controls" data-section="controls">
    <form class="search-form" action="/books" method="get">
        <input type="search" name="q" value="{query}" placeholder="Search by title or author">
        <button type="submit">Search</button>
    </form>
    <select name="category" aria-label="Category">
        <option value="all"{all_selected}>All Categories</option>
        {categories}
    </select>
    <select name="sort" aria-label="Sort by">
        {sorts}
    </select>
</section>"#,
        query = html_escape(&criteria.query),
        all_selected = all_selected,
        categories = category_html,
        sorts = sort_html,
    )
}

/// Render a grid of cards, or the "no results" state when empty.
pub fn render_grid(cards: &[ItemCard], summary: &str) -> String {
    if cards.is_empty() {
        return render_no_results(summary);
    }
    let cards_html: String = cards.iter().map(render_item_card).collect();
    format!(
        r#"<section class="catalog-results" data-section="results">
    <p class="result-summary">{}</p>
    <div class="item-grid">
        {}
    </div>
</section>"#,
        html_escape(summary),
        cards_html
    )
}

/// Render the empty-results state.
pub fn render_no_results(summary: &str) -> String {
    format!(
        r#"<section class="catalog-results empty" data-section="results">
    <p class="result-summary">{}</p>
    <div class="no-results">
        <h2>No books found</h2>
        <p>Try a different search term or category.</p>
    </div>
</section>"#,
        html_escape(summary)
    )
}

/// Render a titled strip of cards (featured, new arrivals, deals).
pub fn render_card_strip(title: &str, section: &str, cards: &[ItemCard]) -> String {
    let cards_html: String = cards.iter().map(render_item_card).collect();
    format!(
        r#"<section class="card-strip" data-section="{}">
    <h2>{}</h2>
    <div class="item-row">
        {}
    </div>
</section>"#,
        html_escape(section),
        html_escape(title),
        cards_html
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::catalog::Item;

    #[test]
    fn test_controls_mark_selection() {
        let criteria = FilterCriteria::new()
            .with_query("war")
            .with_category(CategoryFilter::parse("History"));
        let html = render_browse_controls(&criteria, SortKey::Popular);

        assert!(html.contains(r#"value="war""#));
        assert!(html.contains(r#"<option value="history" selected>"#));
        assert!(html.contains(r#"<option value="popular" selected>"#));
        assert!(html.contains(r#"<option value="all">"#));
    }

    #[test]
    fn test_empty_grid_shows_no_results() {
        let html = render_grid(&[], "Found 0 books");
        assert!(html.contains("No books found"));
    }

    #[test]
    fn test_grid_renders_every_card() {
        let cards: Vec<ItemCard> = (1..=3)
            .map(|i| ItemCard::from_item(&Item::new(i, "T", "A", 100.0)))
            .collect();
        let html = render_grid(&cards, "Found 3 books");
        assert_eq!(html.matches("<article").count(), 3);
    }
}
