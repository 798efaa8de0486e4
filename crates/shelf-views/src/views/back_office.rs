//! Back-office item list with delete.

use shelf_auth::AdminSession;
use shelf_core::catalog::Item;
use shelf_core::ItemId;
use shelf_data::{RequestGeneration, RequestTicket};
use tracing::{debug, info, warn};

use crate::sections::{render_error, render_item_table, render_loading};
use crate::state::{LoadState, DELETE_ERROR, LOAD_ERROR};
use crate::{SharedCatalog, ViewError};

/// Admin table of every item.
///
/// Deletes are not optimistic: a row disappears only after the service
/// confirms the delete.
pub struct BackOfficeListView {
    api: SharedCatalog,
    session: AdminSession,
    generation: RequestGeneration,
    items: LoadState<Vec<Item>>,
    notice: Option<String>,
}

impl BackOfficeListView {
    pub fn new(api: SharedCatalog, session: AdminSession) -> Self {
        Self {
            api,
            session,
            generation: RequestGeneration::new(),
            items: LoadState::Idle,
            notice: None,
        }
    }

    fn ensure_session(&self) -> Result<(), ViewError> {
        if self.session.is_expired() {
            info!(username = %self.session.username, "admin session expired");
            return Err(ViewError::LoginRequired);
        }
        Ok(())
    }

    fn accept(&self, ticket: RequestTicket) -> Result<(), ViewError> {
        if self.generation.is_current(ticket) {
            Ok(())
        } else {
            debug!(generation = ticket.generation(), "discarding stale back-office response");
            Err(ViewError::Stale)
        }
    }

    pub async fn load(&mut self) -> Result<(), ViewError> {
        self.ensure_session()?;
        self.items = LoadState::Loading;
        let ticket = self.generation.issue();
        let result = self.api.list_items().await;
        self.accept(ticket)?;

        match result {
            Ok(items) => {
                self.items = LoadState::Loaded(items);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "back-office list load failed");
                self.items = LoadState::Failed(LOAD_ERROR.to_string());
                Err(e.into())
            }
        }
    }

    /// Delete an item. On failure the list is left exactly as it was and
    /// an error notice is shown.
    pub async fn delete(&mut self, id: ItemId) -> Result<(), ViewError> {
        self.ensure_session()?;
        let ticket = self.generation.issue();
        let result = self.api.delete_item(id).await;
        self.accept(ticket)?;

        match result {
            Ok(()) => {
                if let LoadState::Loaded(items) = &mut self.items {
                    items.retain(|i| i.id != id);
                }
                self.notice = None;
                info!(%id, "item deleted");
                Ok(())
            }
            Err(e) => {
                warn!(%id, error = %e, "delete failed");
                self.notice = Some(DELETE_ERROR.to_string());
                Err(e.into())
            }
        }
    }

    pub fn close(&mut self) {
        self.generation.close();
    }

    pub fn items(&self) -> &LoadState<Vec<Item>> {
        &self.items
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    pub fn render(&self) -> String {
        match &self.items {
            LoadState::Idle | LoadState::Loading => render_loading("admin-list"),
            LoadState::Failed(message) => render_error("admin-list", message),
            LoadState::Loaded(items) => render_item_table(items, self.notice()),
        }
    }
}
