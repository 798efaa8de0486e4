//! CLI command implementations.

pub mod admin;
pub mod browse;
pub mod config;
pub mod health;
pub mod render;
pub mod show;
pub mod strip;

use clap::{Args, Subcommand};
use shelf_core::browse::SortKey;
use shelf_core::ItemId;

/// Arguments for the browse command.
#[derive(Args, Clone)]
pub struct BrowseArgs {
    /// Search text, matched against title and author.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Category slug, or "all".
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Sort order: newest, price-low, price-high or popular.
    #[arg(short, long, default_value = "newest")]
    pub sort: SortKey,

    /// Page number (1-based). Clamped to the last page.
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Items per page (default: from config).
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Item ID.
    pub id: ItemId,
}

/// Which home page strip to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strip {
    NewArrivals,
    Featured,
    Deals,
}

/// Arguments for the new-arrivals, featured and deals commands.
#[derive(Args)]
pub struct StripArgs {
    /// Show at most this many items.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    #[command(subcommand)]
    pub page: RenderPage,

    /// Write the HTML to a file instead of stdout.
    #[arg(short, long, global = true)]
    pub output: Option<String>,
}

#[derive(Subcommand)]
pub enum RenderPage {
    /// Home page strips.
    Home,
    /// Catalog list with controls and pagination.
    Catalog(BrowseArgs),
    /// One item's detail page.
    Item {
        /// Item ID.
        id: ItemId,
    },
    /// New arrivals strip.
    NewArrivals,
    /// Back-office login form.
    Login,
    /// Back-office item table (requires login).
    Admin,
    /// Back-office add-item form (requires login).
    AddForm,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Log in to the back office.
    Login {
        /// Username (prompted if omitted).
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted if omitted).
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out of the back office.
    Logout,
    /// Show the current session.
    Status,
    /// List every item.
    List,
    /// Add an item. Missing fields are prompted for.
    Add {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        isbn: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        price: Option<String>,
    },
    /// Delete an item.
    Delete {
        /// Item ID.
        id: ItemId,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Print an Argon2 hash for admin.password_hash.
    HashPassword {
        /// Password to hash (prompted if omitted).
        #[arg(long)]
        password: Option<String>,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default shelf.toml.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration.
    Validate,
}
