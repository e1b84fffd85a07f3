//! Shopping cart state and its persisted form.
//!
//! A cart is an ordered list of `{product id, quantity}` lines with at most
//! one line per product. It is stored under a single key as a JSON array of
//! `{"id": ..., "qty": ...}` objects.

mod store;
mod summary;

use std::num::NonZeroU32;

use fa_portfolio_core::ProductId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::StorageError;

pub use store::{CartObserver, CartStore};
pub use summary::{CartSummary, SummaryLine};

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "fa_portfolio_cart_v1";

/// Errors returned by cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Quantity must be at least 1 (got {0})")]
    InvalidQuantity(u32),
    #[error("Quantity for {0} exceeds the maximum")]
    QuantityOverflow(ProductId),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One product reference and how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    #[serde(rename = "qty")]
    pub quantity: NonZeroU32,
}

/// Ordered cart lines, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CartState {
    lines: Vec<CartLine>,
}

/// A line as it may appear in storage, before normalization.
#[derive(Debug, Deserialize)]
struct StoredLine {
    id: String,
    qty: i64,
}

impl CartState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// The line for `product_id`, if any.
    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.product_id.as_str() == product_id)
    }

    /// Sum of all line quantities, whether or not the products still exist.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Merge `quantity` into the line for `product_id`, appending a new line
    /// if there is none.
    ///
    /// # Errors
    ///
    /// Returns `CartError::QuantityOverflow` if the merged quantity does not
    /// fit; the state is left unchanged.
    pub fn add(&mut self, product_id: &ProductId, quantity: NonZeroU32) -> Result<(), CartError> {
        match self
            .lines
            .iter_mut()
            .find(|line| &line.product_id == product_id)
        {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(quantity.get())
                    .ok_or_else(|| CartError::QuantityOverflow(product_id.clone()))?;
            }
            None => self.lines.push(CartLine {
                product_id: product_id.clone(),
                quantity,
            }),
        }
        Ok(())
    }

    /// Drop the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id.as_str() != product_id);
        self.lines.len() != before
    }

    /// Keep only the lines for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&CartLine) -> bool) {
        self.lines.retain(keep);
    }

    /// Parse a stored cart.
    ///
    /// Lines with an unusable id or a quantity below 1 are dropped, quantities
    /// above `u32::MAX` are clamped, and repeated ids are merged so the result
    /// always satisfies the cart invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not an array of `{id, qty}` objects.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let stored: Vec<StoredLine> = serde_json::from_str(json)?;
        let mut state = Self::new();

        for line in stored {
            let Ok(product_id) = ProductId::parse(&line.id) else {
                tracing::debug!(id = %line.id, "Dropping stored cart line with invalid id");
                continue;
            };
            let clamped = u32::try_from(line.qty.max(0)).unwrap_or(u32::MAX);
            let Some(quantity) = NonZeroU32::new(clamped) else {
                tracing::debug!(id = %line.id, qty = line.qty, "Dropping stored cart line with non-positive quantity");
                continue;
            };
            if state.add(&product_id, quantity).is_err() {
                // Duplicate lines summing past u32::MAX saturate.
                if let Some(existing) = state.lines.iter_mut().find(|l| l.product_id == product_id) {
                    existing.quantity = NonZeroU32::MAX;
                }
            }
        }

        Ok(state)
    }

    /// Serialize to the stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// What reading the cart key found.
///
/// Every outcome can be turned into a usable cart with [`CartLoad::into_state`];
/// the variants exist so callers and tests can tell a fresh cart from a
/// recovered one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartLoad {
    /// Nothing stored under the key.
    Missing,
    /// A valid cart was stored.
    Loaded(CartState),
    /// The stored value could not be parsed.
    Corrupt { reason: String },
    /// The storage backend could not be read.
    Unavailable { reason: String },
}

impl CartLoad {
    /// The loaded cart, or an empty one for every other outcome.
    #[must_use]
    pub fn into_state(self) -> CartState {
        match self {
            Self::Loaded(state) => state,
            Self::Missing | Self::Corrupt { .. } | Self::Unavailable { .. } => CartState::new(),
        }
    }

    /// Whether the stored data had to be discarded.
    #[must_use]
    pub const fn is_recovered(&self) -> bool {
        matches!(self, Self::Corrupt { .. } | Self::Unavailable { .. })
    }
}
