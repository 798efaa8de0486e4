//! Catalog browse command.

use anyhow::{Context as _, Result};
use serde::Serialize;
use shelf_core::browse::Pagination;
use shelf_core::card::ItemCard;
use shelf_core::catalog::CategoryFilter;
use shelf_views::CatalogListView;

use super::BrowseArgs;
use crate::context::Context;

#[derive(Serialize)]
struct BrowseOutput<'a> {
    query: &'a str,
    category: &'a str,
    sort: &'a str,
    summary: String,
    pagination: Pagination,
    items: Vec<ItemCard>,
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let view = load_view(&args, ctx).await?;
    let browse = view.browse();
    let page = view.page();

    if ctx.output.is_json() {
        ctx.output.json(&BrowseOutput {
            query: browse.query(),
            category: browse.category().as_str(),
            sort: browse.sort_key().as_str(),
            summary: browse.summary(),
            pagination: page.pagination,
            items: view.cards(),
        });
        return Ok(());
    }

    ctx.output.header("Books");
    ctx.output.kv("Sort", browse.sort_key().display_name());
    ctx.output.kv("Showing", &browse.summary());

    if page.is_empty() {
        ctx.output.info("No books match your search.");
        return Ok(());
    }

    println!();
    ctx.output.cards(&view.cards());
    println!();

    let window: Vec<String> = browse
        .page_window()
        .iter()
        .map(|n| {
            if *n == browse.current_page() {
                format!("[{}]", n)
            } else {
                n.to_string()
            }
        })
        .collect();
    ctx.output.kv(
        "Page",
        &format!(
            "{} of {}  {}",
            browse.current_page(),
            browse.total_pages(),
            window.join(" ")
        ),
    );
    if page.pagination.has_next {
        ctx.output.debug(&format!("Next: shelf browse --page {}", browse.current_page() + 1));
    }

    Ok(())
}

/// Fetch the catalog and apply the query, category, sort and page.
pub async fn load_view(args: &BrowseArgs, ctx: &Context) -> Result<CatalogListView> {
    let mut view = new_view(args, ctx)?;

    let spinner = ctx.output.spinner("Loading catalog...");
    let loaded = view.load().await;
    spinner.finish_and_clear();
    loaded.context("Failed to load the catalog")?;

    apply_selection(&mut view, args);
    Ok(view)
}

/// An unloaded catalog view with the configured page size.
pub fn new_view(args: &BrowseArgs, ctx: &Context) -> Result<CatalogListView> {
    let page_size = args.page_size.unwrap_or(ctx.config.browse.page_size);
    CatalogListView::new(ctx.catalog()?)
        .with_page_size(page_size)
        .context("Invalid page size")
}

/// Apply the command line selections. The page is set last because every
/// other change sends the view back to page 1.
pub fn apply_selection(view: &mut CatalogListView, args: &BrowseArgs) {
    view.search(args.query.as_str());
    view.set_category(CategoryFilter::parse(&args.category));
    view.set_sort(args.sort);
    view.go_to_page(args.page);
}
