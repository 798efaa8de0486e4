//! Shelf CLI - Command line front end for the Bookshelf storefront.
//!
//! Commands:
//! - `shelf browse` - Search, filter, sort and page through the catalog
//! - `shelf show` - Show one book
//! - `shelf new-arrivals` / `featured` / `deals` - Home page strips
//! - `shelf render` - Print a page as an HTML fragment
//! - `shelf admin` - Back-office login, list, add and delete
//! - `shelf health` - Check the catalog service
//! - `shelf config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AdminArgs, BrowseArgs, ConfigArgs, RenderArgs, ShowArgs, Strip, StripArgs};
use shelf_observability::{init_tracing, LogLevel};

/// Shelf CLI - Browse and manage the Bookshelf catalog
#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Use the bundled sample catalog instead of the catalog service
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, filter, sort and page through the catalog
    Browse(BrowseArgs),

    /// Show the details of one book
    Show(ShowArgs),

    /// List the newest arrivals
    NewArrivals(StripArgs),

    /// List the featured books
    Featured(StripArgs),

    /// List the best discounts
    Deals(StripArgs),

    /// Render a page as an HTML fragment
    Render(RenderArgs),

    /// Back-office commands
    Admin(AdminArgs),

    /// Check the catalog service
    Health,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, cli.offline, output)?;

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        ctx.config.logging.level
    };
    init_tracing(ctx.config.logging.format, level);

    // Execute command. `config` must work even when the file is invalid.
    let result = match cli.command {
        Commands::Config(args) => commands::config::run(args, &ctx).await,
        command => match ctx.config.ensure_valid() {
            Ok(()) => dispatch(command, &ctx).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

async fn dispatch(command: Commands, ctx: &context::Context) -> Result<()> {
    match command {
        Commands::Browse(args) => commands::browse::run(args, ctx).await,
        Commands::Show(args) => commands::show::run(args, ctx).await,
        Commands::NewArrivals(args) => commands::strip::run(Strip::NewArrivals, args, ctx).await,
        Commands::Featured(args) => commands::strip::run(Strip::Featured, args, ctx).await,
        Commands::Deals(args) => commands::strip::run(Strip::Deals, args, ctx).await,
        Commands::Render(args) => commands::render::run(args, ctx).await,
        Commands::Admin(args) => commands::admin::run(args, ctx).await,
        Commands::Health => commands::health::run(ctx).await,
        Commands::Config(args) => commands::config::run(args, ctx).await,
    }
}
