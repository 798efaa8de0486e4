//! The catalog collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shelf_core::catalog::{Item, NewItem};
use shelf_core::ItemId;

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

impl FetchError {
    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub message: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            message: "healthy".to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.message == "healthy"
    }
}

/// Source of catalog data.
///
/// Every call is a single attempt; callers decide how to surface failures.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// All items.
    async fn list_items(&self) -> Result<Vec<Item>, FetchError>;

    /// Items flagged as new arrivals.
    async fn new_items(&self) -> Result<Vec<Item>, FetchError>;

    /// One item by id. A missing item is `Ok(None)`.
    async fn get_item(&self, id: ItemId) -> Result<Option<Item>, FetchError>;

    /// Create an item and return it as stored.
    async fn create_item(&self, item: &NewItem) -> Result<Item, FetchError>;

    /// Delete an item.
    async fn delete_item(&self, id: ItemId) -> Result<(), FetchError>;

    /// Service health.
    async fn health(&self) -> Result<HealthStatus, FetchError>;
}
