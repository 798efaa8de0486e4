//! Item detail command.

use anyhow::{bail, Context as _, Result};
use shelf_core::card::ItemCard;
use shelf_views::{DetailState, DetailView};

use super::ShowArgs;
use crate::context::Context;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let mut view = DetailView::new(ctx.catalog()?);

    let spinner = ctx.output.spinner(&format!("Loading book {}...", args.id));
    let loaded = view.load(args.id).await;
    spinner.finish_and_clear();
    loaded.with_context(|| format!("Failed to load book {}", args.id))?;

    let item = match view.state() {
        DetailState::Found(item) => item,
        DetailState::NotFound => bail!("Book {} not found", args.id),
        DetailState::Loading | DetailState::Failed(_) => bail!("Book {} is not available", args.id),
    };

    if ctx.output.is_json() {
        ctx.output.json(item);
        return Ok(());
    }

    let card = ItemCard::from_item(item);
    ctx.output.header(&item.title);
    ctx.output.kv("Author", &item.author);
    if !item.category.is_empty() {
        ctx.output.kv("Category", &item.category);
    }
    match card.struck_price {
        Some(struck) => ctx.output.kv("Price", &format!("{} (was {})", card.price, struck)),
        None => ctx.output.kv("Price", &card.price.to_string()),
    }
    if !card.badges.is_empty() {
        let badges: Vec<String> = card.badges.iter().map(|b| b.label()).collect();
        ctx.output.kv("Badges", &badges.join(" "));
    }
    ctx.output.kv(
        "Rating",
        &format!("{} ({} reviews)", card.stars.glyphs(), card.review_count),
    );
    if let Some(isbn) = &item.isbn {
        ctx.output.kv("ISBN", isbn);
    }
    if let Some(year) = item.year {
        let year = if year < 0 {
            format!("{} BC", -year)
        } else {
            year.to_string()
        };
        ctx.output.kv("Year", &year);
    }
    if let Some(pages) = item.pages {
        ctx.output.kv("Pages", &pages.to_string());
    }
    if let Some(publisher) = &item.publisher {
        ctx.output.kv("Publisher", publisher);
    }
    if let Some(language) = &item.language {
        ctx.output.kv("Language", language);
    }
    if !item.description.is_empty() {
        println!();
        println!("  {}", item.description);
    }

    Ok(())
}
