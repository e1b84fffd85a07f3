//! F&A Portfolio CLI - Browse the catalog and manage the cart.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! fa categories
//! fa products --category wrist-watch
//! fa show w1
//!
//! # Cart
//! fa cart add w1 --qty 2
//! fa cart show
//! fa cart link
//!
//! # Direct "buy now" link for one product
//! fa buy s1
//! ```
//!
//! Configuration comes from `FA_*` environment variables (see
//! `fa_portfolio_storefront::config`). Links and listings go to stdout; logs go
//! to stderr and are controlled by `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use fa_portfolio_core::Category;
use fa_portfolio_storefront::{
    CartStore, Catalog, CheckoutLinks, FallbackStorage, FileStorage, KeyValueStorage,
    StorefrontConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{CliError, Session};

#[derive(Parser)]
#[command(name = "fa")]
#[command(author, version, about = "F&A portfolio catalog and cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List product categories
    Categories,
    /// List products
    Products {
        /// Only show this category (e.g. "Wrist Watch" or wrist-watch)
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Show a product and its buy-now link
    Show {
        /// Product id
        id: String,
    },
    /// Print the buy-now link for a product
    Buy {
        /// Product id
        id: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and checkout link
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Print the number of items in the cart
    Count,
    /// Print the checkout link for the cart
    Link,
    /// Remove items that are no longer in the catalog
    Prune,
}

fn main() {
    // Defaults to warn for the library and info for the CLI if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fa_portfolio_storefront=warn,fa=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = StorefrontConfig::from_env()?;
    let catalog = Catalog::load(config.catalog_path.as_deref())?;
    let links = CheckoutLinks::from_config(&config);
    let storage = FallbackStorage::new(FileStorage::new(&config.storage_path));
    tracing::debug!(path = %config.storage_path.display(), "Using cart storage");

    let mut session = Session::new(catalog, links, CartStore::new(storage));
    let mut out = std::io::stdout().lock();
    dispatch(&mut session, cli.command, &mut out)?;

    if session.cart.storage().is_degraded() {
        tracing::warn!("Cart changes could not be saved and will be lost when this command exits");
    }
    Ok(())
}

fn dispatch<S: KeyValueStorage>(
    session: &mut Session<S>,
    command: Commands,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Commands::Categories => commands::catalog::categories(session, out)?,
        Commands::Products { category } => commands::catalog::products(session, category, out)?,
        Commands::Show { id } => commands::catalog::show(session, &id, out)?,
        Commands::Buy { id } => commands::catalog::buy(session, &id, out)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(session, out)?,
            CartAction::Add { id, qty } => commands::cart::add(session, &id, qty, out)?,
            CartAction::Remove { id } => commands::cart::remove(session, &id, out)?,
            CartAction::Clear => commands::cart::clear(session, out)?,
            CartAction::Count => commands::cart::count(session, out)?,
            CartAction::Link => commands::cart::link(session, out)?,
            CartAction::Prune => commands::cart::prune(session, out)?,
        },
    }

    // Badge refresh after a mutation
    if let Some(total) = session.badge.take() {
        tracing::info!(items = total, "Cart updated");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::commands::test_support::{output, session};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_category_argument() {
        let cli = Cli::try_parse_from(["fa", "products", "--category", "alarm-clock"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Products {
                category: Some(Category::AlarmClock)
            }
        ));
        assert!(Cli::try_parse_from(["fa", "products", "-c", "wall-clock"]).is_err());
    }

    #[test]
    fn test_dispatch_sequence() {
        let mut session = session();
        let mut sink = Vec::new();
        let commands = [
            ["fa", "cart", "add", "w1"].as_slice(),
            &["fa", "cart", "add", "w1", "--qty", "2"],
            &["fa", "cart", "add", "s1"],
            &["fa", "cart", "remove", "s1"],
        ];
        for args in commands {
            let cli = Cli::try_parse_from(args).unwrap();
            dispatch(&mut session, cli.command, &mut sink).unwrap();
        }

        let mut buf = Vec::new();
        let cli = Cli::try_parse_from(["fa", "cart", "count"]).unwrap();
        dispatch(&mut session, cli.command, &mut buf).unwrap();
        assert_eq!(output(buf), "3\n");
    }
}
