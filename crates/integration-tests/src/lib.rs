//! Integration tests for the F&A portfolio storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fa-portfolio-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart store and checkout message behavior end to end
//! - `storage_persistence` - File-backed storage across sessions and failures

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use fa_portfolio_core::{CurrencyCode, DestinationId, ProductId};
use fa_portfolio_storefront::{CartStore, Catalog, CheckoutLinks, FileStorage};
use tempfile::TempDir;

/// Seller number used by every test link.
pub const TEST_PHONE: &str = "919798303821";

/// Site origin used by every test link.
pub const TEST_ORIGIN: &str = "https://fa.example";

/// Catalog, link builder and a scratch directory for file storage.
pub struct TestContext {
    pub catalog: Catalog,
    pub links: CheckoutLinks,
    dir: TempDir,
}

impl TestContext {
    /// # Panics
    ///
    /// Panics if the scratch directory cannot be created.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        let links = CheckoutLinks::new(
            "wa.me",
            DestinationId::parse(TEST_PHONE).unwrap(),
            &url::Url::parse(TEST_ORIGIN).unwrap(),
            CurrencyCode::INR,
        );
        Self {
            catalog: Catalog::builtin(),
            links,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Path of the storage file inside the scratch directory.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    /// A fresh cart store over the scratch storage file. Stores opened from
    /// the same context share state, like two page loads of the site.
    #[must_use]
    pub fn open_store(&self) -> CartStore<FileStorage> {
        CartStore::new(FileStorage::new(self.storage_path()))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a product id.
///
/// # Panics
///
/// Panics if `s` is not a valid id.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn pid(s: &str) -> ProductId {
    ProductId::parse(s).unwrap()
}
