//! Back-office item table.

use shelf_core::catalog::Item;

use super::html_escape;

/// Render the back-office list as a table with delete buttons.
pub fn render_item_table(items: &[Item], notice: Option<&str>) -> String {
    let notice_html = notice
        .map(|n| format!(r#"<p class="notice error">{}</p>"#, html_escape(n)))
        .unwrap_or_default();

    let rows: String = items
        .iter()
        .map(|item| {
            format!(
                r#"<tr data-item-id="{id}">
            <td>{id}</td>
            <td>{title}</td>
            <td>{author}</td>
            <td>{isbn}</td>
            <td>{year}</td>
            <td>{price}</td>
            <td><button class="delete" data-item-id="{id}">Delete</button></td>
        </tr>"#,
                id = item.id,
                title = html_escape(&item.title),
                author = html_escape(&item.author),
                isbn = item.isbn.as_deref().map(html_escape).unwrap_or_default(),
                year = item.year.map(|y| y.to_string()).unwrap_or_default(),
                price = item.price().display(),
            )
        })
        .collect();

    let body = if items.is_empty() {
        r#"<tr><td colspan="7" class="empty">No books yet</td></tr>"#.to_string()
    } else {
        rows
    };

    format!(
        r#"<section class="admin-list" data-section="admin-list">
    <header>
        <h1>All Books ({count})</h1>
        <a href="/admin/books/new" class="button">Add Book</a>
    </header>
    {notice}
    <table class="item-table">
        <thead>
            <tr><th>ID</th><th>Title</th><th>Author</th><th>ISBN</th><th>Year</th><th>Price</th><th></th></tr>
        </thead>
        <tbody>
        {body}
        </tbody>
    </table>
</section>"#,
        count = items.len(),
        notice = notice_html,
        body = body,
    )
}
