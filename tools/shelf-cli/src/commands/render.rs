//! Render a page as an HTML fragment.

use anyhow::{Context as _, Result};
use shelf_views::{
    require_admin, AddItemView, BackOfficeListView, DetailView, HomeView, LoginView,
    NewArrivalsView, ViewError,
};

use super::browse::{apply_selection, new_view};
use super::{RenderArgs, RenderPage};
use crate::context::Context;

/// Run the render command.
pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    let html = render_page(args.page, ctx).await?;

    match args.output {
        Some(path) => {
            let path = ctx.resolve_path(&path);
            std::fs::write(&path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ctx.output.success(&format!("Wrote {}", path.display()));
        }
        None => println!("{}", html),
    }
    Ok(())
}

/// Views render their failure state, so load errors are logged and the
/// fragment is still produced. Only a missing login is fatal.
async fn render_page(page: RenderPage, ctx: &Context) -> Result<String> {
    let html = match page {
        RenderPage::Home => {
            let mut view = HomeView::new(ctx.catalog()?);
            tolerate(view.load().await, ctx);
            view.render()
        }
        RenderPage::Catalog(args) => {
            let mut view = new_view(&args, ctx)?;
            tolerate(view.load().await, ctx);
            apply_selection(&mut view, &args);
            view.render()
        }
        RenderPage::Item { id } => {
            let mut view = DetailView::new(ctx.catalog()?);
            tolerate(view.load(id).await, ctx);
            view.render()
        }
        RenderPage::NewArrivals => {
            let mut view = NewArrivalsView::new(ctx.catalog()?);
            tolerate(view.load().await, ctx);
            view.render()
        }
        RenderPage::Login => {
            let mut gate = ctx.auth_gate()?;
            LoginView::new(&mut gate).render()
        }
        RenderPage::Admin => {
            let session = admin_session(ctx)?;
            let mut view = BackOfficeListView::new(ctx.catalog()?, session);
            tolerate(view.load().await, ctx);
            view.render()
        }
        RenderPage::AddForm => {
            let session = admin_session(ctx)?;
            AddItemView::new(ctx.catalog()?, session).render()
        }
    };
    Ok(html)
}

fn admin_session(ctx: &Context) -> Result<shelf_auth::AdminSession> {
    let mut gate = ctx.auth_gate()?;
    require_admin(&mut gate).context("Not logged in; run `shelf admin login` first")
}

fn tolerate(result: Result<(), ViewError>, ctx: &Context) {
    if let Err(e) = result {
        ctx.output.warn(&format!("Rendering error state: {}", e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;
    use shelf_core::ItemId;

    fn offline_ctx(dir: &std::path::Path) -> Context {
        let mut config = CliConfig::default();
        config.storage.path = Some(dir.join("store.json").to_string_lossy().into_owned());
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
            offline: true,
        }
    }

    #[tokio::test]
    async fn test_render_offline_pages() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = offline_ctx(dir.path());

        let home = render_page(RenderPage::Home, &ctx).await.unwrap();
        assert!(home.contains(r#"data-section="deals""#));

        let item = render_page(RenderPage::Item { id: ItemId::new(7) }, &ctx).await.unwrap();
        assert!(item.contains("The Art of War"));
    }

    #[tokio::test]
    async fn test_admin_pages_require_login() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = offline_ctx(dir.path());

        assert!(render_page(RenderPage::Admin, &ctx).await.is_err());

        ctx.auth_gate().unwrap().login("bookstoreadmin", "ManageBook68").unwrap();
        let table = render_page(RenderPage::Admin, &ctx).await.unwrap();
        assert!(table.contains("The Art of War"));
    }
}
