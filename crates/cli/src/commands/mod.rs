//! Command implementations.
//!
//! Each command performs one core operation and then renders its result to
//! the given writer, so commands can be exercised against an in-memory
//! storage and a byte buffer.

pub mod cart;
pub mod catalog;

use std::cell::Cell;
use std::rc::Rc;

use fa_portfolio_core::ProductId;
use fa_portfolio_storefront::{
    AppError, CartError, CartObserver, CartStore, Catalog, CatalogError, CheckoutLinks,
    ConfigError, KeyValueStorage, Product,
};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code: 2 for bad input, 1 for everything else.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::App(err) if err.is_user_error() => 2,
            _ => 1,
        }
    }
}

impl From<CartError> for CliError {
    fn from(err: CartError) -> Self {
        Self::App(err.into())
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        Self::App(err.into())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::App(err.into())
    }
}

/// Cart item-count badge, updated by the cart store after each mutation.
#[derive(Debug, Clone, Default)]
pub struct Badge(Rc<Cell<Option<u64>>>);

impl Badge {
    /// The latest count, if the cart changed since the last call.
    pub fn take(&self) -> Option<u64> {
        self.0.take()
    }
}

impl CartObserver for Badge {
    fn cart_changed(&self, total_quantity: u64) {
        self.0.set(Some(total_quantity));
    }
}

/// Everything a command needs: the catalog, the link builder and the cart.
pub struct Session<S> {
    pub catalog: Catalog,
    pub links: CheckoutLinks,
    pub cart: CartStore<S>,
    pub badge: Badge,
}

impl<S: KeyValueStorage> Session<S> {
    pub fn new(catalog: Catalog, links: CheckoutLinks, mut cart: CartStore<S>) -> Self {
        let badge = Badge::default();
        cart.subscribe(badge.clone());
        Self {
            catalog,
            links,
            cart,
            badge,
        }
    }

    /// Look up a product named on the command line.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for a malformed id and `NotFound` for an unknown one.
    pub fn product(&self, raw_id: &str) -> Result<&Product, CliError> {
        let id = parse_product_id(raw_id)?;
        self.catalog
            .get_by_id(id.as_str())
            .ok_or_else(|| AppError::NotFound(format!("product {id}")).into())
    }
}

/// Parse a product id argument.
///
/// # Errors
///
/// Returns `BadRequest` if the id is malformed.
pub fn parse_product_id(raw: &str) -> Result<ProductId, CliError> {
    ProductId::parse(raw)
        .map_err(|e| AppError::BadRequest(format!("invalid product id {raw:?}: {e}")).into())
}
