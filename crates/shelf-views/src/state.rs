//! Load and submit states shared by the views.

use serde::Serialize;
use shelf_core::catalog::Item;

/// Shown when a list or detail fetch fails, whatever the cause.
pub const LOAD_ERROR: &str = "Failed to load books. Please try again later.";
/// Shown when creating an item fails.
pub const SAVE_ERROR: &str = "Failed to add the book. Please try again.";
/// Shown when deleting an item fails.
pub const DELETE_ERROR: &str = "Failed to delete the book. Please try again.";

/// Progress of a fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum LoadState<T> {
    /// Nothing requested yet.
    Idle,
    Loading,
    Loaded(T),
    /// Failed, with a user-facing message.
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// State of the item detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(tag = "state", content = "item", rename_all = "kebab-case")]
pub enum DetailState {
    #[default]
    Loading,
    Found(Box<Item>),
    NotFound,
    Failed(String),
}

/// State of a form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    /// Saved; carries the success message.
    Succeeded(String),
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_accessors() {
        let state: LoadState<Vec<u32>> = LoadState::Loaded(vec![1]);
        assert_eq!(state.loaded(), Some(&vec![1]));
        assert!(state.error().is_none());

        let failed: LoadState<()> = LoadState::Failed(LOAD_ERROR.to_string());
        assert_eq!(failed.error(), Some(LOAD_ERROR));
        assert!(!failed.is_loading());
    }
}
