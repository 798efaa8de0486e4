//! Storefront home: featured, new arrivals and deals.
//!
//! Featured and deals come from the full catalog, new arrivals from its own
//! endpoint. Each strip keeps its own load state, so one failed request
//! only blanks the strip that depends on it.

use serde::Serialize;
use shelf_core::card::ItemCard;
use shelf_core::catalog::{
    Item, StaticCatalog, DEALS_LIMIT, FEATURED_LIMIT, NEW_ARRIVALS_LIMIT,
};
use shelf_data::{FetchError, RequestGeneration};
use tracing::{debug, warn};

use crate::sections::{render_card_strip, render_error, render_loading};
use crate::state::{LoadState, LOAD_ERROR};
use crate::{SharedCatalog, ViewError};

/// The three strips on the home page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeSections {
    pub featured: LoadState<Vec<Item>>,
    pub new_arrivals: LoadState<Vec<Item>>,
    pub deals: LoadState<Vec<Item>>,
}

impl HomeSections {
    fn loading() -> Self {
        Self {
            featured: LoadState::Loading,
            new_arrivals: LoadState::Loading,
            deals: LoadState::Loading,
        }
    }

    /// Apply the catalog response to the strips derived from it.
    fn apply_catalog(&mut self, all: &Result<Vec<Item>, FetchError>) {
        match all {
            Ok(items) => {
                let catalog = StaticCatalog::from_items(items.clone());
                self.featured = LoadState::Loaded(catalog.featured(FEATURED_LIMIT));
                self.deals = LoadState::Loaded(catalog.deals(DEALS_LIMIT));
            }
            Err(e) => {
                warn!(error = %e, "home catalog load failed");
                self.featured = LoadState::Failed(LOAD_ERROR.to_string());
                self.deals = LoadState::Failed(LOAD_ERROR.to_string());
            }
        }
    }

    fn apply_new_arrivals(&mut self, new_arrivals: &Result<Vec<Item>, FetchError>) {
        self.new_arrivals = match new_arrivals {
            Ok(items) => {
                LoadState::Loaded(items.iter().take(NEW_ARRIVALS_LIMIT).cloned().collect())
            }
            Err(e) => {
                warn!(error = %e, "new arrivals load failed");
                LoadState::Failed(LOAD_ERROR.to_string())
            }
        };
    }
}

pub struct HomeView {
    api: SharedCatalog,
    generation: RequestGeneration,
    sections: HomeSections,
}

impl HomeView {
    pub fn new(api: SharedCatalog) -> Self {
        Self {
            api,
            generation: RequestGeneration::new(),
            sections: HomeSections::default(),
        }
    }

    /// Fetch the catalog and the new arrivals concurrently.
    ///
    /// Every strip is updated before returning. The error, if any, is the
    /// catalog failure first, then the new-arrivals failure.
    pub async fn load(&mut self) -> Result<(), ViewError> {
        self.sections = HomeSections::loading();
        let ticket = self.generation.issue();

        let (all, new_arrivals) = futures::join!(self.api.list_items(), self.api.new_items());

        if !self.generation.is_current(ticket) {
            debug!(generation = ticket.generation(), "discarding stale home response");
            return Err(ViewError::Stale);
        }
        self.sections.apply_catalog(&all);
        self.sections.apply_new_arrivals(&new_arrivals);

        all?;
        new_arrivals?;
        Ok(())
    }

    pub fn close(&mut self) {
        self.generation.close();
    }

    pub fn sections(&self) -> &HomeSections {
        &self.sections
    }

    pub fn render(&self) -> String {
        [
            render_strip("Featured Books", "featured", &self.sections.featured),
            render_strip("New Arrivals", "new-arrivals", &self.sections.new_arrivals),
            render_strip("Deals", "deals", &self.sections.deals),
        ]
        .concat()
    }
}

fn render_strip(title: &str, key: &str, state: &LoadState<Vec<Item>>) -> String {
    match state {
        LoadState::Idle | LoadState::Loading => render_loading(key),
        LoadState::Failed(message) => render_error(key, message),
        LoadState::Loaded(items) => {
            let cards: Vec<ItemCard> = items.iter().map(ItemCard::from_item).collect();
            render_card_strip(title, key, &cards)
        }
    }
}
