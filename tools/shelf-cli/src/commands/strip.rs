//! Home page strip commands: new arrivals, featured and deals.

use anyhow::{Context as _, Result};
use shelf_core::card::ItemCard;
use shelf_core::catalog::Item;
use shelf_views::{HomeView, NewArrivalsView};

use super::{Strip, StripArgs};
use crate::context::Context;

impl Strip {
    fn title(self) -> &'static str {
        match self {
            Strip::NewArrivals => "New Arrivals",
            Strip::Featured => "Featured Books",
            Strip::Deals => "Deals",
        }
    }
}

/// Run one of the strip commands.
pub async fn run(strip: Strip, args: StripArgs, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner(&format!("Loading {}...", strip.title().to_lowercase()));
    let loaded = load(strip, ctx).await;
    spinner.finish_and_clear();
    let mut items = loaded?;

    if let Some(limit) = args.limit {
        items.truncate(limit);
    }
    let cards: Vec<ItemCard> = items.iter().map(ItemCard::from_item).collect();

    if ctx.output.is_json() {
        ctx.output.json(&cards);
        return Ok(());
    }

    ctx.output.header(strip.title());
    if cards.is_empty() {
        ctx.output.info("Nothing to show.");
        return Ok(());
    }
    ctx.output.cards(&cards);
    Ok(())
}

async fn load(strip: Strip, ctx: &Context) -> Result<Vec<Item>> {
    let api = ctx.catalog()?;

    if strip == Strip::NewArrivals {
        let mut view = NewArrivalsView::new(api);
        view.load().await.context("Failed to load new arrivals")?;
        return Ok(view.state().loaded().cloned().unwrap_or_default());
    }

    // Featured and deals derive from the catalog alone.
    let mut view = HomeView::new(api);
    let loaded = view.load().await;
    let sections = view.sections();
    let state = match strip {
        Strip::Featured => &sections.featured,
        _ => &sections.deals,
    };
    match (state.loaded(), loaded) {
        (Some(items), _) => Ok(items.clone()),
        (None, Err(e)) => Err(e).context("Failed to load the catalog"),
        (None, Ok(())) => Ok(Vec::new()),
    }
}
