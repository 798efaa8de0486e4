//! Catalog error types.

use thiserror::Error;

use crate::ids::ItemId;

/// Errors that can occur in catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Item not found.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// Page size must be at least one.
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    /// Unknown sort key.
    #[error("Invalid sort key: {0}")]
    InvalidSortKey(String),

    /// Category slug outside the known list.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Item id could not be parsed.
    #[error("Invalid item id: {0}")]
    InvalidItemId(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::SerializationError(e.to_string())
    }
}
