//! New arrivals view.

use shelf_core::card::ItemCard;
use shelf_core::catalog::{Item, NEW_ARRIVALS_LIMIT};
use shelf_data::{FetchError, RequestGeneration, RequestTicket};
use tracing::{debug, warn};

use crate::sections::{render_card_strip, render_error, render_loading};
use crate::state::{LoadState, LOAD_ERROR};
use crate::{SharedCatalog, ViewError};

/// Strip of the newest items from the service's new-arrivals endpoint.
pub struct NewArrivalsView {
    api: SharedCatalog,
    generation: RequestGeneration,
    limit: usize,
    state: LoadState<Vec<Item>>,
}

impl NewArrivalsView {
    pub fn new(api: SharedCatalog) -> Self {
        Self {
            api,
            generation: RequestGeneration::new(),
            limit: NEW_ARRIVALS_LIMIT,
            state: LoadState::Idle,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub async fn load(&mut self) -> Result<(), ViewError> {
        self.state = LoadState::Loading;
        let ticket = self.generation.issue();
        let result = self.api.new_items().await;
        self.apply(ticket, result)
    }

    pub fn apply(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Item>, FetchError>,
    ) -> Result<(), ViewError> {
        if !self.generation.is_current(ticket) {
            debug!(generation = ticket.generation(), "discarding stale new-arrivals response");
            return Err(ViewError::Stale);
        }
        match result {
            Ok(mut items) => {
                items.truncate(self.limit);
                self.state = LoadState::Loaded(items);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "new arrivals load failed");
                self.state = LoadState::Failed(LOAD_ERROR.to_string());
                Err(e.into())
            }
        }
    }

    pub fn close(&mut self) {
        self.generation.close();
    }

    pub fn state(&self) -> &LoadState<Vec<Item>> {
        &self.state
    }

    pub fn cards(&self) -> Vec<ItemCard> {
        self.state
            .loaded()
            .map(|items| items.iter().map(ItemCard::from_item).collect())
            .unwrap_or_default()
    }

    pub fn render(&self) -> String {
        match &self.state {
            LoadState::Idle | LoadState::Loading => render_loading("new-arrivals"),
            LoadState::Failed(message) => render_error("new-arrivals", message),
            LoadState::Loaded(_) => render_card_strip("New Arrivals", "new-arrivals", &self.cards()),
        }
    }
}
