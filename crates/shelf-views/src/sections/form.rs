//! Add-item form and login form.

use shelf_core::form::{AddItemForm, FormField};

use crate::state::SubmitState;

use super::html_escape;

/// Render the add-item form with per-field errors and the submit status.
pub fn render_add_item_form(form: &AddItemForm, status: &SubmitState) -> String {
    let banner = match status {
        SubmitState::Succeeded(msg) => {
            format!(r#"<p class="notice success">{}</p>"#, html_escape(msg))
        }
        SubmitState::Failed(msg) => format!(r#"<p class="notice error">{}</p>"#, html_escape(msg)),
        SubmitState::Idle | SubmitState::Submitting => String::new(),
    };

    let fields: String = FormField::ALL
        .iter()
        .map(|&field| {
            let error = form.errors().get(field);
            let input_type = match field {
                FormField::Year | FormField::Price => "number",
                _ => "text",
            };
            format!(
                r#"<div class="form-field{invalid}">
        <label for="{name}">{label}</label>
        <input id="{name}" name="{name}" type="{input_type}" value="{value}">
        {error}
    </div>"#,
                invalid = if error.is_some() { " invalid" } else { "" },
                name = field.as_str(),
                label = field.label(),
                input_type = input_type,
                value = html_escape(form.value(field)),
                error = error
                    .map(|e| format!(r#"<p class="field-error">{}</p>"#, html_escape(e)))
                    .unwrap_or_default(),
            )
        })
        .collect();

    let disabled = if matches!(status, SubmitState::Submitting) {
        " disabled"
    } else {
        ""
    };

    format!(
        r#"<section class="add-item" data-section="add-item">
    <h1>Add Book</h1>
    {banner}
    <form method="post" action="/admin/books/new" novalidate>
    {fields}
    <button type="submit"{disabled}>Add Book</button>
    </form>
</section>"#
    )
}

/// Render the back-office login form.
pub fn render_login_form(username: &str, error: Option<&str>) -> String {
    let error_html = error
        .map(|e| format!(r#"<p class="notice error">{}</p>"#, html_escape(e)))
        .unwrap_or_default();
    format!(
        r#"<section class="login" data-section="login">
    <h1>Back Office Login</h1>
    {}
    <form method="post" action="/login">
        <label for="username">Username</label>
        <input id="username" name="username" value="{}" required>
        <label for="password">Password</label>
        <input id="password" name="password" type="password" required>
        <button type="submit">Log In</button>
    </form>
</section>"#,
        error_html,
        html_escape(username)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_shows_field_errors() {
        let mut form = AddItemForm::new().with(FormField::Year, "abcd");
        let _ = form.validate_for_year(2026);
        let html = render_add_item_form(&form, &SubmitState::Idle);

        assert!(html.contains(r#"<p class="field-error">Year must be a number</p>"#));
        assert!(html.contains(r#"value="abcd""#));
        assert_eq!(html.matches("form-field invalid").count(), 5);
    }

    #[test]
    fn test_success_banner() {
        let html = render_add_item_form(
            &AddItemForm::new(),
            &SubmitState::Succeeded("Added \"Dune\"".into()),
        );
        assert!(html.contains("Added &quot;Dune&quot;"));
        assert!(!html.contains("field-error"));
    }

    #[test]
    fn test_login_form_error() {
        let html = render_login_form("bob", Some("Invalid username or password"));
        assert!(html.contains(r#"value="bob""#));
        assert!(html.contains("Invalid username or password"));
    }
}
