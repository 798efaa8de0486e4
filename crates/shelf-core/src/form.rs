//! Back-office add-item form.
//!
//! Field values are held as the raw text the user typed. [`AddItemForm::validate`]
//! checks every field at once and either yields a [`NewItem`] ready to send
//! or a [`FormErrors`] map. Editing a field clears only that field's error.

use crate::catalog::NewItem;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Shortest accepted title or author.
pub const MIN_NAME_LEN: usize = 2;
/// Earliest accepted publication year.
pub const MIN_YEAR: i32 = 1000;
/// Highest accepted price.
pub const MAX_PRICE: f64 = 999_999.0;

/// A field of the add-item form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Title,
    Author,
    Isbn,
    Year,
    Price,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Author,
        FormField::Isbn,
        FormField::Year,
        FormField::Price,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Author => "author",
            FormField::Isbn => "isbn",
            FormField::Year => "year",
            FormField::Price => "price",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Author => "Author",
            FormField::Isbn => "ISBN",
            FormField::Year => "Year",
            FormField::Price => "Price",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation messages keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// The add-item form state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddItemForm {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: String,
    pub price: String,
    #[serde(default)]
    errors: FormErrors,
}

impl AddItemForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field's text, clearing any error shown for it.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::Author => self.author = value,
            FormField::Isbn => self.isbn = value,
            FormField::Year => self.year = value,
            FormField::Price => self.price = value,
        }
        self.errors.clear(field);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Author => &self.author,
            FormField::Isbn => &self.isbn,
            FormField::Year => &self.year,
            FormField::Price => &self.price,
        }
    }

    /// Errors from the last validation, minus fields edited since.
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Validate against the current calendar year.
    pub fn validate(&mut self) -> Result<NewItem, FormErrors> {
        self.validate_for_year(Utc::now().year())
    }

    /// Validate with an explicit "current year" bound.
    pub fn validate_for_year(&mut self, current_year: i32) -> Result<NewItem, FormErrors> {
        let mut errors = FormErrors::new();

        let title = check_name(&mut errors, FormField::Title, &self.title);
        let author = check_name(&mut errors, FormField::Author, &self.author);
        let isbn = check_isbn(&mut errors, &self.isbn);
        let year = check_year(&mut errors, &self.year, current_year);
        let price = check_price(&mut errors, &self.price);

        self.errors = errors.clone();
        match (title, author, isbn, year, price) {
            (Some(title), Some(author), Some(isbn), Some(year), Some(price)) if errors.is_empty() => {
                Ok(NewItem {
                    title,
                    author,
                    isbn,
                    year,
                    price,
                })
            }
            _ => Err(errors),
        }
    }

    /// Clear every field and error, e.g. after a successful submit.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn check_name(errors: &mut FormErrors, field: FormField, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        errors.insert(field, format!("{} is required", field.label()));
        None
    } else if value.chars().count() < MIN_NAME_LEN {
        errors.insert(
            field,
            format!("{} must be at least {} characters", field.label(), MIN_NAME_LEN),
        );
        None
    } else {
        Some(value.to_string())
    }
}

fn check_isbn(errors: &mut FormErrors, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        errors.insert(FormField::Isbn, "ISBN is required");
        None
    } else if !value.chars().all(|c| c.is_ascii_digit() || c == '-') {
        errors.insert(FormField::Isbn, "ISBN may only contain digits and '-'");
        None
    } else {
        Some(value.to_string())
    }
}

fn check_year(errors: &mut FormErrors, raw: &str, current_year: i32) -> Option<i32> {
    let value = raw.trim();
    if value.is_empty() {
        errors.insert(FormField::Year, "Year is required");
        return None;
    }
    let Ok(year) = value.parse::<i32>() else {
        errors.insert(FormField::Year, "Year must be a number");
        return None;
    };
    let max = current_year + 1;
    if !(MIN_YEAR..=max).contains(&year) {
        errors.insert(
            FormField::Year,
            format!("Year must be between {} and {}", MIN_YEAR, max),
        );
        return None;
    }
    Some(year)
}

fn check_price(errors: &mut FormErrors, raw: &str) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        errors.insert(FormField::Price, "Price is required");
        return None;
    }
    let price = match value.parse::<f64>() {
        Ok(p) if p.is_finite() => p,
        _ => {
            errors.insert(FormField::Price, "Price must be a number");
            return None;
        }
    };
    if price <= 0.0 {
        errors.insert(FormField::Price, "Price must be greater than 0");
        None
    } else if price > MAX_PRICE {
        errors.insert(FormField::Price, "Price must not exceed 999,999");
        None
    } else {
        Some(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> AddItemForm {
        AddItemForm::new()
            .with(FormField::Title, "  Dune ")
            .with(FormField::Author, "Frank Herbert")
            .with(FormField::Isbn, "978-0-441-17271-9")
            .with(FormField::Year, "1965")
            .with(FormField::Price, "459.50")
    }

    #[test]
    fn test_valid_form_produces_trimmed_item() {
        let item = valid_form().validate_for_year(2026).unwrap();
        assert_eq!(item.title, "Dune");
        assert_eq!(item.year, 1965);
        assert_eq!(item.price, 459.5);
    }

    #[test]
    fn test_non_numeric_year_blocks_submission() {
        let mut form = valid_form().with(FormField::Year, "abcd");
        let errors = form.validate_for_year(2026).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::Year), Some("Year must be a number"));
        assert_eq!(form.errors(), &errors);
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = AddItemForm::new().validate_for_year(2026).unwrap_err();
        for field in FormField::ALL {
            assert!(errors.get(field).unwrap().ends_with("is required"));
        }
    }

    #[test]
    fn test_year_bounds() {
        let mut form = valid_form().with(FormField::Year, "999");
        assert!(form.validate_for_year(2026).is_err());

        form.set(FormField::Year, "2027");
        assert!(form.validate_for_year(2026).is_ok());

        form.set(FormField::Year, "2028");
        let errors = form.validate_for_year(2026).unwrap_err();
        assert_eq!(
            errors.get(FormField::Year),
            Some("Year must be between 1000 and 2027")
        );
    }

    #[test]
    fn test_price_rules() {
        for (raw, ok) in [("0", false), ("-5", false), ("1000000", false), ("x", false), ("999999", true)] {
            let mut form = valid_form().with(FormField::Price, raw);
            assert_eq!(form.validate_for_year(2026).is_ok(), ok, "price {raw}");
        }
    }

    #[test]
    fn test_short_names_and_bad_isbn() {
        let mut form = valid_form()
            .with(FormField::Title, "A")
            .with(FormField::Isbn, "978 0441");
        let errors = form.validate_for_year(2026).unwrap_err();
        assert!(errors.get(FormField::Title).is_some());
        assert!(errors.get(FormField::Isbn).is_some());
        assert!(errors.get(FormField::Author).is_none());
    }

    #[test]
    fn test_editing_clears_only_that_field() {
        let mut form = AddItemForm::new();
        let _ = form.validate_for_year(2026);
        assert_eq!(form.errors().len(), 5);

        form.set(FormField::Title, "Dune");
        assert!(form.errors().get(FormField::Title).is_none());
        assert_eq!(form.errors().len(), 4);
    }
}
