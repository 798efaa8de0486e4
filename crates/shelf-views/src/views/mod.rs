//! View controllers.

mod add_item;
mod back_office;
mod catalog_list;
mod detail;
mod home;
mod login;
mod new_arrivals;

pub use add_item::AddItemView;
pub use back_office::BackOfficeListView;
pub use catalog_list::CatalogListView;
pub use detail::DetailView;
pub use home::{HomeSections, HomeView};
pub use login::{require_admin, LoginView, LOGIN_ERROR};
pub use new_arrivals::NewArrivalsView;

#[cfg(test)]
pub(crate) mod testing {
    use shelf_core::catalog::StaticCatalog;
    use shelf_data::MockCatalog;
    use std::sync::Arc;

    pub fn sample_mock() -> Arc<MockCatalog> {
        let catalog = StaticCatalog::sample().unwrap();
        Arc::new(MockCatalog::new(catalog.items().to_vec()))
    }
}
