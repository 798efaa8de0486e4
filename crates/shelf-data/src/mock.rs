//! Scriptable in-memory catalog for tests.

use async_trait::async_trait;
use shelf_core::catalog::{Item, NewItem};
use shelf_core::ItemId;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::api::{CatalogApi, FetchError, HealthStatus};

/// A call received by [`MockCatalog`].
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    ListItems,
    NewItems,
    GetItem(ItemId),
    CreateItem(NewItem),
    DeleteItem(ItemId),
    Health,
}

/// Records calls and answers from a fixed item list, failing on demand.
#[derive(Debug, Default)]
pub struct MockCatalog {
    items: Mutex<Vec<Item>>,
    calls: Mutex<Vec<MockCall>>,
    fail_with: Mutex<Option<u16>>,
}

impl MockCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Default::default()
        }
    }

    /// Answer every following call with this HTTP status.
    pub fn fail_with_status(&self, status: u16) {
        *lock(&self.fail_with) = Some(status);
    }

    pub fn succeed(&self) {
        *lock(&self.fail_with) = None;
    }

    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn items(&self) -> Vec<Item> {
        lock(&self.items).clone()
    }

    fn record(&self, call: MockCall, path: &str) -> Result<(), FetchError> {
        lock(&self.calls).push(call);
        match *lock(&self.fail_with) {
            Some(status) => Err(FetchError::Http {
                status,
                url: format!("mock:{}", path),
            }),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn list_items(&self) -> Result<Vec<Item>, FetchError> {
        self.record(MockCall::ListItems, "/api/v1/books/")?;
        Ok(self.items())
    }

    async fn new_items(&self) -> Result<Vec<Item>, FetchError> {
        self.record(MockCall::NewItems, "/api/v1/books/new")?;
        Ok(self
            .items()
            .into_iter()
            .filter(|i| i.is_new_arrival())
            .collect())
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<Item>, FetchError> {
        self.record(MockCall::GetItem(id), "/api/v1/books/{id}")?;
        Ok(self.items().into_iter().find(|i| i.id == id))
    }

    async fn create_item(&self, item: &NewItem) -> Result<Item, FetchError> {
        self.record(MockCall::CreateItem(item.clone()), "/api/v1/books/")?;
        let mut items = lock(&self.items);
        let next_id = items.iter().map(|i| i.id.get()).max().unwrap_or(0) + 1;
        let mut created = Item::new(next_id, item.title.clone(), item.author.clone(), item.price);
        created.isbn = Some(item.isbn.clone());
        created.year = Some(item.year);
        items.push(created.clone());
        Ok(created)
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), FetchError> {
        self.record(MockCall::DeleteItem(id), "/api/v1/books/{id}")?;
        let mut items = lock(&self.items);
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(FetchError::Http {
                status: 404,
                url: format!("mock:/api/v1/books/{}", id),
            });
        }
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus, FetchError> {
        self.record(MockCall::Health, "/health")?;
        Ok(HealthStatus::healthy())
    }
}
