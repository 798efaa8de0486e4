//! Catalog list view: search, category, sort and pagination over all items.

use shelf_core::browse::{BrowseState, Page, SortKey};
use shelf_core::card::ItemCard;
use shelf_core::catalog::{CategoryFilter, Item};
use shelf_core::{CatalogError, ItemId};
use shelf_data::{FetchError, RequestGeneration, RequestTicket};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::sections::{
    render_browse_controls, render_error, render_grid, render_loading, render_pagination,
};
use crate::state::{LoadState, LOAD_ERROR};
use crate::{SharedCatalog, ViewError};

#[derive(Debug, Clone, Copy, Default)]
struct CardFlags {
    favorite: bool,
    in_cart: bool,
}

/// The main catalog page.
pub struct CatalogListView {
    api: SharedCatalog,
    generation: RequestGeneration,
    browse: BrowseState,
    load_state: LoadState<()>,
    flags: HashMap<ItemId, CardFlags>,
}

impl CatalogListView {
    pub fn new(api: SharedCatalog) -> Self {
        Self {
            api,
            generation: RequestGeneration::new(),
            browse: BrowseState::new(Vec::new()),
            load_state: LoadState::Idle,
            flags: HashMap::new(),
        }
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Result<Self, CatalogError> {
        self.browse = self.browse.with_page_size(page_size)?;
        Ok(self)
    }

    /// Fetch the catalog and apply it.
    pub async fn load(&mut self) -> Result<(), ViewError> {
        let ticket = self.begin_load();
        let result = self.api.list_items().await;
        self.apply_items(ticket, result)
    }

    /// Mark the view as loading and take a ticket for the fetch.
    pub fn begin_load(&mut self) -> RequestTicket {
        self.load_state = LoadState::Loading;
        self.generation.issue()
    }

    /// Apply a fetch result if `ticket` is still current.
    pub fn apply_items(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Item>, FetchError>,
    ) -> Result<(), ViewError> {
        if !self.generation.is_current(ticket) {
            debug!(generation = ticket.generation(), "discarding stale catalog response");
            return Err(ViewError::Stale);
        }
        match result {
            Ok(items) => {
                info!(count = items.len(), "catalog loaded");
                self.browse.set_source(items);
                self.load_state = LoadState::Loaded(());
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "catalog load failed");
                self.load_state = LoadState::Failed(LOAD_ERROR.to_string());
                Err(e.into())
            }
        }
    }

    /// Tear the view down. In-flight results will be discarded.
    pub fn close(&mut self) {
        self.generation.close();
    }

    /// Handle for closing the view from elsewhere.
    pub fn generation(&self) -> RequestGeneration {
        self.generation.clone()
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.browse.search(query);
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.browse.set_category(category);
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.browse.set_sort(key);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.browse.go_to(page);
    }

    pub fn next_page(&mut self) -> bool {
        self.browse.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.browse.prev_page()
    }

    pub fn load_state(&self) -> &LoadState<()> {
        &self.load_state
    }

    pub fn browse(&self) -> &BrowseState {
        &self.browse
    }

    /// Items on the current page.
    pub fn page(&self) -> Page<Item> {
        self.browse.current_page_items()
    }

    /// Cards for the current page, with their local toggles applied.
    pub fn cards(&self) -> Vec<ItemCard> {
        self.page()
            .items
            .iter()
            .map(|item| {
                let mut card = ItemCard::from_item(item);
                if let Some(flags) = self.flags.get(&item.id) {
                    card.favorite = flags.favorite;
                    card.in_cart = flags.in_cart;
                }
                card
            })
            .collect()
    }

    /// Flip an item's favorite toggle. Returns the new value.
    pub fn toggle_favorite(&mut self, id: ItemId) -> bool {
        let flags = self.flags.entry(id).or_default();
        flags.favorite = !flags.favorite;
        flags.favorite
    }

    /// Flip an item's cart toggle. Returns the new value.
    pub fn toggle_cart(&mut self, id: ItemId) -> bool {
        let flags = self.flags.entry(id).or_default();
        flags.in_cart = !flags.in_cart;
        flags.in_cart
    }

    pub fn render(&self) -> String {
        match &self.load_state {
            LoadState::Idle | LoadState::Loading => render_loading("results"),
            LoadState::Failed(message) => render_error("results", message),
            LoadState::Loaded(()) => {
                let browse = &self.browse;
                let mut html = render_browse_controls(browse.criteria(), browse.sort_key());
                html.push_str(&render_grid(&self.cards(), &browse.summary()));
                html.push_str(&render_pagination(
                    browse.current_page(),
                    browse.total_pages(),
                    browse.criteria(),
                    browse.sort_key(),
                ));
                html
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::sample_mock;
    use shelf_data::MockCall;

    fn ids(items: &[Item]) -> Vec<i64> {
        items.iter().map(|i| i.id.get()).collect()
    }

    #[tokio::test]
    async fn test_load_and_paginate() {
        let mock = sample_mock();
        let mut view = CatalogListView::new(mock.clone());
        view.load().await.unwrap();

        assert_eq!(mock.calls(), vec![MockCall::ListItems]);
        assert_eq!(view.page().len(), 12);
        assert!(view.next_page());
        assert_eq!(view.page().len(), 3);
        assert!(!view.next_page());
        assert!(view.render().contains("pagination-next disabled"));
    }

    #[tokio::test]
    async fn test_failed_load_shows_generic_error() {
        let mock = sample_mock();
        mock.fail_with_status(500);
        let mut view = CatalogListView::new(mock);

        assert!(view.load().await.is_err());
        assert_eq!(view.load_state().error(), Some(LOAD_ERROR));
        assert!(view.render().contains(LOAD_ERROR));
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let mock = sample_mock();
        let mut view = CatalogListView::new(mock);

        let first = view.begin_load();
        let second = view.begin_load();

        let stale = vec![Item::new(99, "Old", "Nobody", 1.0)];
        assert!(matches!(
            view.apply_items(first, Ok(stale)),
            Err(ViewError::Stale)
        ));
        assert!(view.load_state().is_loading());

        let fresh = vec![Item::new(1, "New", "Somebody", 2.0)];
        view.apply_items(second, Ok(fresh)).unwrap();
        assert_eq!(ids(&view.page().items), vec![1]);
    }

    #[tokio::test]
    async fn test_results_after_close_are_dropped() {
        let mut view = CatalogListView::new(sample_mock());
        let ticket = view.begin_load();
        view.close();

        let result = view.apply_items(ticket, Ok(vec![Item::new(1, "A", "B", 1.0)]));
        assert!(matches!(result, Err(ViewError::Stale)));
        assert!(view.browse().source_items().is_empty());
    }

    #[tokio::test]
    async fn test_filters_compose_and_page_resets() {
        let mut view = CatalogListView::new(sample_mock());
        view.load().await.unwrap();
        view.go_to_page(2);

        view.set_category(CategoryFilter::parse("business"));
        view.search("the");
        assert_eq!(view.browse().current_page(), 1);
        assert_eq!(ids(&view.page().items), vec![12, 9]);

        view.set_sort(SortKey::PriceLow);
        assert_eq!(ids(&view.page().items), vec![9, 12]);
    }

    #[tokio::test]
    async fn test_card_toggles_are_local() {
        let mut view = CatalogListView::new(sample_mock());
        view.load().await.unwrap();

        let id = ItemId::new(15);
        assert!(view.toggle_favorite(id));
        let card = view.cards().into_iter().find(|c| c.id == id).unwrap();
        assert!(card.favorite);
        assert!(!card.in_cart);
    }
}
