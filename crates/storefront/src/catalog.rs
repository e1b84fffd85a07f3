//! Read-only product catalog.
//!
//! The catalog is loaded once at startup and never mutated. Cart lines refer
//! to products by id only, so every lookup here may legitimately come back
//! empty: a cart persisted in an earlier session can name a product that has
//! since been removed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use fa_portfolio_core::{Category, CurrencyCode, Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The catalog shipped with the site.
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Errors that can occur while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate product id: {0}")]
    DuplicateProductId(ProductId),
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A purchasable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    /// Whole-unit price; the currency comes from configuration.
    pub price: u64,
    /// Asset path relative to the site root (e.g. `images/wrist1.png`).
    pub image: String,
    #[serde(alias = "desc")]
    pub description: String,
}

impl Product {
    /// Unit price in the given currency.
    #[must_use]
    pub const fn unit_price(&self, currency: CurrencyCode) -> Price {
        Price::new(self.price, currency)
    }
}

/// Ordered, immutable list of products with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, keeping definition order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateProductId` if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateProductId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// The five-product catalog of the F&A collection.
    ///
    /// # Panics
    ///
    /// Never in practice: the embedded data is covered by tests.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).expect("built-in catalog is valid")
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or ids are duplicated.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Load the catalog from `path`, or the built-in one when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let Some(path) = path else {
            return Ok(Self::builtin());
        };

        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Products in `category`, in catalog order.
    #[must_use]
    pub fn list_by_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut out: Vec<Category> = Vec::new();
        for product in &self.products {
            if !out.contains(&product.category) {
                out.push(product.category);
            }
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
