//! Back-office add-item view.

use shelf_auth::AdminSession;
use shelf_core::catalog::Item;
use shelf_core::form::{AddItemForm, FormField};
use shelf_data::RequestGeneration;
use tracing::{debug, info, warn};

use crate::sections::render_add_item_form;
use crate::state::{SubmitState, SAVE_ERROR};
use crate::{SharedCatalog, ViewError};

/// The add-item form page.
pub struct AddItemView {
    api: SharedCatalog,
    session: AdminSession,
    generation: RequestGeneration,
    form: AddItemForm,
    status: SubmitState,
}

impl AddItemView {
    pub fn new(api: SharedCatalog, session: AdminSession) -> Self {
        Self {
            api,
            session,
            generation: RequestGeneration::new(),
            form: AddItemForm::new(),
            status: SubmitState::Idle,
        }
    }

    /// Edit a field. Clears that field's error and any stale banner.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
        if !matches!(self.status, SubmitState::Submitting) {
            self.status = SubmitState::Idle;
        }
    }

    /// Validate and, only if valid, send the create request.
    pub async fn submit(&mut self) -> Result<Item, ViewError> {
        if self.session.is_expired() {
            return Err(ViewError::LoginRequired);
        }

        let new_item = match self.form.validate() {
            Ok(item) => item,
            Err(errors) => {
                debug!(fields = errors.len(), "add-item form rejected");
                self.status = SubmitState::Idle;
                return Err(ViewError::Invalid(errors));
            }
        };

        self.status = SubmitState::Submitting;
        let ticket = self.generation.issue();
        let result = self.api.create_item(&new_item).await;
        if !self.generation.is_current(ticket) {
            debug!(generation = ticket.generation(), "discarding stale create response");
            return Err(ViewError::Stale);
        }

        match result {
            Ok(created) => {
                info!(id = %created.id, title = %created.title, "item added");
                self.status = SubmitState::Succeeded(format!("Added \"{}\"", created.title));
                self.form.reset();
                Ok(created)
            }
            Err(e) => {
                warn!(error = %e, "create failed");
                self.status = SubmitState::Failed(SAVE_ERROR.to_string());
                Err(e.into())
            }
        }
    }

    pub fn close(&mut self) {
        self.generation.close();
    }

    pub fn form(&self) -> &AddItemForm {
        &self.form
    }

    pub fn status(&self) -> &SubmitState {
        &self.status
    }

    pub fn render(&self) -> String {
        render_add_item_form(&self.form, &self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::sample_mock;
    use chrono::Duration;
    use shelf_data::MockCall;

    fn view(mock: std::sync::Arc<shelf_data::MockCatalog>) -> AddItemView {
        AddItemView::new(mock, AdminSession::issue("bookstoreadmin", Duration::hours(1)))
    }

    fn fill(view: &mut AddItemView, year: &str) {
        view.set_field(FormField::Title, "Dune");
        view.set_field(FormField::Author, "Frank Herbert");
        view.set_field(FormField::Isbn, "978-0-441-17271-9");
        view.set_field(FormField::Year, year);
        view.set_field(FormField::Price, "459");
    }

    #[tokio::test]
    async fn test_invalid_year_sends_no_request() {
        let mock = sample_mock();
        let mut view = view(mock.clone());
        fill(&mut view, "abcd");

        let err = view.submit().await.unwrap_err();
        match err {
            ViewError::Invalid(errors) => {
                assert_eq!(errors.get(FormField::Year), Some("Year must be a number"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(mock.call_count(), 0);
        assert!(view.render().contains("Year must be a number"));
    }

    #[tokio::test]
    async fn test_valid_submit_creates_and_resets() {
        let mock = sample_mock();
        let mut view = view(mock.clone());
        fill(&mut view, "1965");

        let created = view.submit().await.unwrap();
        assert_eq!(created.id.get(), 16);
        assert_eq!(view.status(), &SubmitState::Succeeded("Added \"Dune\"".into()));
        assert!(view.form().title.is_empty());
        assert!(matches!(mock.calls()[0], MockCall::CreateItem(_)));
    }

    #[tokio::test]
    async fn test_server_failure_keeps_input() {
        let mock = sample_mock();
        mock.fail_with_status(500);
        let mut view = view(mock);
        fill(&mut view, "1965");

        assert!(view.submit().await.is_err());
        assert_eq!(view.status(), &SubmitState::Failed(SAVE_ERROR.to_string()));
        assert_eq!(view.form().title, "Dune");
    }
}
