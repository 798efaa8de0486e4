//! Item card section.

use shelf_core::card::{ItemCard, RatingStars};

use super::html_escape;

/// Render one item card.
pub fn render_item_card(card: &ItemCard) -> String {
    let badges: String = card
        .badges
        .iter()
        .map(|b| {
            format!(
                r#"<span class="badge {}">{}</span>"#,
                b.css_class(),
                html_escape(&b.label())
            )
        })
        .collect();

    let image = match &card.cover_image {
        Some(src) => format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            html_escape(src),
            html_escape(&card.title)
        ),
        None => r#"<div class="cover-placeholder"></div>"#.to_string(),
    };

    let struck = card
        .struck_price
        .map(|p| format!(r#"<s class="original-price">{}</s>"#, p.display()))
        .unwrap_or_default();

    format!(
        r#"<article class="item-card" data-item-id="{id}">
    <a href="/books/{id}" class="item-link">
        <div class="item-image">
            {image}
            <div class="badges">{badges}</div>
        </div>
        <div class="item-info">
            <h3 class="item-title">{title}</h3>
            <p class="item-author">{author}</p>
            <div class="item-rating">
                {stars}
                <span class="review-count">({reviews})</span>
            </div>
            <div class="item-price">
                <span class="price">{price}</span>
                {struck}
            </div>
        </div>
    </a>
    <button class="favorite{fav_class}" data-item-id="{id}" aria-pressed="{fav}">&#9829;</button>
    <button class="add-to-cart{cart_class}" data-item-id="{id}" aria-pressed="{cart}">{cart_label}</button>
</article>"#,
        id = card.id,
        image = image,
        badges = badges,
        title = html_escape(&card.title),
        author = html_escape(&card.author),
        stars = render_stars(card.stars),
        reviews = card.review_count,
        price = card.price.display(),
        struck = struck,
        fav_class = if card.favorite { " active" } else { "" },
        fav = card.favorite,
        cart_class = if card.in_cart { " active" } else { "" },
        cart = card.in_cart,
        cart_label = if card.in_cart { "In Cart" } else { "Add to Cart" },
    )
}

/// Render a five-star rating.
pub fn render_stars(stars: RatingStars) -> String {
    let mut html = String::from(r#"<span class="stars">"#);
    for _ in 0..stars.filled {
        html.push_str(r#"<span class="star full">★</span>"#);
    }
    for _ in 0..stars.empty() {
        html.push_str(r#"<span class="star empty">☆</span>"#);
    }
    html.push_str("</span>");
    html
}
