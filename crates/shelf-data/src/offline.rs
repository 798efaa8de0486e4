//! Offline catalog backed by the bundled sample data.

use async_trait::async_trait;
use shelf_core::catalog::{Item, NewItem, StaticCatalog, NEW_ARRIVALS_LIMIT};
use shelf_core::{CatalogError, ItemId};
use std::sync::Mutex;
use tracing::debug;

use crate::api::{CatalogApi, FetchError, HealthStatus};

/// In-process catalog that answers like the service would.
///
/// Writes live only as long as the value does.
#[derive(Debug)]
pub struct OfflineCatalog {
    catalog: Mutex<StaticCatalog>,
}

impl OfflineCatalog {
    /// Load the bundled sample catalog.
    pub fn sample() -> Result<Self, CatalogError> {
        Ok(Self::new(StaticCatalog::sample()?))
    }

    pub fn new(catalog: StaticCatalog) -> Self {
        Self {
            catalog: Mutex::new(catalog),
        }
    }

    fn with_catalog<T>(
        &self,
        f: impl FnOnce(&mut StaticCatalog) -> Result<T, FetchError>,
    ) -> Result<T, FetchError> {
        let mut catalog = self
            .catalog
            .lock()
            .map_err(|_| FetchError::Request("offline catalog lock poisoned".into()))?;
        f(&mut catalog)
    }
}

fn offline_url(path: &str) -> String {
    format!("offline:{}", path)
}

#[async_trait]
impl CatalogApi for OfflineCatalog {
    async fn list_items(&self) -> Result<Vec<Item>, FetchError> {
        self.with_catalog(|c| Ok(c.items().to_vec()))
    }

    async fn new_items(&self) -> Result<Vec<Item>, FetchError> {
        self.with_catalog(|c| Ok(c.new_arrivals(NEW_ARRIVALS_LIMIT)))
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<Item>, FetchError> {
        self.with_catalog(|c| Ok(c.find_by_id(id).cloned()))
    }

    async fn create_item(&self, item: &NewItem) -> Result<Item, FetchError> {
        self.with_catalog(|c| {
            let created = c.insert(item);
            debug!(id = %created.id, "offline insert");
            Ok(created)
        })
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), FetchError> {
        self.with_catalog(|c| {
            c.remove(id).map(|_| ()).map_err(|_| FetchError::Http {
                status: 404,
                url: offline_url(&format!("/api/v1/books/{}", id)),
            })
        })
    }

    async fn health(&self) -> Result<HealthStatus, FetchError> {
        Ok(HealthStatus::healthy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_answers_like_the_service() {
        let api = OfflineCatalog::sample().unwrap();
        assert_eq!(api.list_items().await.unwrap().len(), 15);
        assert!(api.get_item(ItemId::new(99)).await.unwrap().is_none());
        assert!(api.health().await.unwrap().is_healthy());

        let ids: Vec<i64> = api
            .new_items()
            .await
            .unwrap()
            .iter()
            .map(|i| i.id.get())
            .collect();
        assert_eq!(ids, vec![2, 6, 10]);
    }

    #[tokio::test]
    async fn test_offline_create_and_delete() {
        let api = OfflineCatalog::sample().unwrap();
        let created = api
            .create_item(&NewItem {
                title: "Dune".into(),
                author: "Frank Herbert".into(),
                isbn: "978-0-441-17271-9".into(),
                year: 1965,
                price: 459.0,
            })
            .await
            .unwrap();
        assert_eq!(created.id.get(), 16);

        api.delete_item(created.id).await.unwrap();
        let err = api.delete_item(created.id).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
