//! Item detail view.

use shelf_core::catalog::Item;
use shelf_core::ItemId;
use shelf_data::{FetchError, RequestGeneration, RequestTicket};
use tracing::{debug, warn};

use crate::sections::{render_error, render_item_detail, render_loading, render_not_found};
use crate::state::{DetailState, LOAD_ERROR};
use crate::{SharedCatalog, ViewError};

/// Shows one item by id.
pub struct DetailView {
    api: SharedCatalog,
    generation: RequestGeneration,
    state: DetailState,
}

impl DetailView {
    pub fn new(api: SharedCatalog) -> Self {
        Self {
            api,
            generation: RequestGeneration::new(),
            state: DetailState::Loading,
        }
    }

    /// Fetch `id`. Navigating to another id supersedes an earlier load.
    pub async fn load(&mut self, id: ItemId) -> Result<(), ViewError> {
        let ticket = self.begin_load();
        let result = self.api.get_item(id).await;
        self.apply(ticket, result)
    }

    pub fn begin_load(&mut self) -> RequestTicket {
        self.state = DetailState::Loading;
        self.generation.issue()
    }

    pub fn apply(
        &mut self,
        ticket: RequestTicket,
        result: Result<Option<Item>, FetchError>,
    ) -> Result<(), ViewError> {
        if !self.generation.is_current(ticket) {
            debug!(generation = ticket.generation(), "discarding stale detail response");
            return Err(ViewError::Stale);
        }
        match result {
            Ok(Some(item)) => {
                self.state = DetailState::Found(Box::new(item));
                Ok(())
            }
            Ok(None) => {
                self.state = DetailState::NotFound;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "item load failed");
                self.state = DetailState::Failed(LOAD_ERROR.to_string());
                Err(e.into())
            }
        }
    }

    pub fn close(&mut self) {
        self.generation.close();
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn render(&self) -> String {
        match &self.state {
            DetailState::Loading => render_loading("detail"),
            DetailState::Found(item) => render_item_detail(item),
            DetailState::NotFound => render_not_found(),
            DetailState::Failed(message) => render_error("detail", message),
        }
    }
}
