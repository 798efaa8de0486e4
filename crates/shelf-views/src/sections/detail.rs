//! Item detail section.

use shelf_core::card::RatingStars;
use shelf_core::catalog::{Category, Item};

use super::{html_escape, render_stars};

/// Render the full detail view of one item.
pub fn render_item_detail(item: &Item) -> String {
    let category = item
        .category
        .parse::<Category>()
        .map(|c| c.display_name().to_string())
        .unwrap_or_else(|_| item.category.clone());

    let original = item
        .original_price()
        .filter(|p| p.amount() != item.price)
        .map(|p| format!(r#" <s class="original-price">{}</s>"#, p.display()))
        .unwrap_or_default();

    let mut facts = Vec::new();
    if let Some(isbn) = &item.isbn {
        facts.push(("ISBN", html_escape(isbn)));
    }
    if let Some(year) = item.year {
        let shown = if year < 0 {
            format!("{} BC", -year)
        } else {
            year.to_string()
        };
        facts.push(("Year", shown));
    }
    if let Some(pages) = item.pages {
        facts.push(("Pages", pages.to_string()));
    }
    if let Some(language) = &item.language {
        facts.push(("Language", html_escape(language)));
    }
    if let Some(publisher) = &item.publisher {
        facts.push(("Publisher", html_escape(publisher)));
    }
    let facts_html: String = facts
        .iter()
        .map(|(k, v)| format!("<dt>{}</dt><dd>{}</dd>", k, v))
        .collect();

    format!(
        r#"<section class="item-detail" data-section="detail" data-item-id="{id}">
    <a href="/books" class="back-link">&larr; Back to all books</a>
    <h1>{title}</h1>
    <p class="item-author">by {author}</p>
    <p class="item-category">{category}</p>
    <div class="item-rating">{stars} <span class="review-count">({reviews} reviews)</span></div>
    <div class="item-price"><span class="price">{price}</span>{original}</div>
    <p class="item-description">{description}</p>
    <dl class="item-facts">{facts}</dl>
</section>"#,
        id = item.id,
        title = html_escape(&item.title),
        author = html_escape(&item.author),
        category = html_escape(&category),
        stars = render_stars(RatingStars::from_rating(item.rating)),
        reviews = item.review_count(),
        price = item.price().display(),
        original = original,
        description = html_escape(&item.description),
        facts = facts_html,
    )
}

/// Render the "book not found" state.
pub fn render_not_found() -> String {
    r#"<section class="item-detail not-found" data-section="detail">
    <h1>Book not found</h1>
    <a href="/books" class="back-link">&larr; Back to all books</a>
</section>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_shows_bce_year_and_facts() {
        let mut item = Item::new(7, "The Art of War", "Sun Tzu", 250.0)
            .with_category("history")
            .with_discount(350.0, 29);
        item.year = Some(-500);
        item.isbn = Some("978-1-59030-225-6".into());

        let html = render_item_detail(&item);
        assert!(html.contains("<dd>500 BC</dd>"));
        assert!(html.contains("<dd>978-1-59030-225-6</dd>"));
        assert!(html.contains(r#"<p class="item-category">History</p>"#));
        assert!(html.contains("฿350"));
    }

    #[test]
    fn test_not_found() {
        assert!(render_not_found().contains("Book not found"));
    }
}
