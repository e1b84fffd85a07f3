//! F&A Portfolio Storefront library.
//!
//! The catalog, the persisted shopping cart and the checkout link builder.
//! Rendering is left to the caller: a front end reads the [`Catalog`],
//! mutates the cart through a [`CartStore`], and asks [`CheckoutLinks`] for
//! the messaging link to show.
//!
//! ```
//! use fa_portfolio_core::ProductId;
//! use fa_portfolio_storefront::{CartStore, Catalog, CheckoutLinks, MemoryStorage, StorefrontConfig};
//!
//! let catalog = Catalog::builtin();
//! let links = CheckoutLinks::from_config(&StorefrontConfig::default());
//! let mut cart = CartStore::new(MemoryStorage::new());
//!
//! let w1 = ProductId::parse("w1").unwrap();
//! cart.add(&w1, 1).unwrap();
//! cart.add(&w1, 2).unwrap();
//!
//! assert_eq!(cart.total_quantity(), 3);
//! assert!(links.build_cart_message(&cart.read(), &catalog).contains("Total: ₹10,497"));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod storage;

pub use cart::{
    CART_KEY, CartError, CartLine, CartLoad, CartObserver, CartState, CartStore, CartSummary,
    SummaryLine,
};
pub use catalog::{Catalog, CatalogError, Product};
pub use checkout::{CheckoutLinks, EMPTY_CART_MESSAGE};
pub use config::{ConfigError, StorefrontConfig};
pub use error::{AppError, Result};
pub use storage::{FallbackStorage, FileStorage, KeyValueStorage, MemoryStorage, StorageError};
