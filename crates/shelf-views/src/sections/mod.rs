//! Section renderers for the storefront and back-office pages.

mod card;
mod detail;
mod form;
mod grid;
mod pagination;
mod table;

pub use card::*;
pub use detail::*;
pub use form::*;
pub use grid::*;
pub use pagination::*;
pub use table::*;

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub(crate) fn urlencoding_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            ' ' => result.push('+'),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

/// Render an error state section.
pub fn render_error(section: &str, message: &str) -> String {
    format!(
        r#"<section class="error-state" data-section="{}">
    <h2>Something went wrong</h2>
    <p>{}</p>
</section>"#,
        html_escape(section),
        html_escape(message)
    )
}

/// Render a loading placeholder.
pub fn render_loading(section: &str) -> String {
    format!(
        r#"<section class="loading" data-section="{}" aria-busy="true">
    <div class="spinner"></div>
</section>"#,
        html_escape(section)
    )
}
