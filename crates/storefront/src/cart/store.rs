//! The cart store: cart state bound to a storage backend.

use std::fmt;
use std::num::NonZeroU32;

use fa_portfolio_core::ProductId;
use tracing::instrument;

use super::{CART_KEY, CartError, CartLoad, CartState};
use crate::catalog::Catalog;
use crate::storage::KeyValueStorage;

/// Notified after every successful cart mutation.
///
/// The UI layer uses this to refresh its item-count badge. Any `Fn(u64)`
/// closure is an observer.
pub trait CartObserver {
    fn cart_changed(&self, total_quantity: u64);
}

impl<F: Fn(u64)> CartObserver for F {
    fn cart_changed(&self, total_quantity: u64) {
        self(total_quantity);
    }
}

/// Owns the persisted cart.
///
/// Storage is the source of truth: every operation reads the current value
/// from the backend, and every mutation writes the complete new cart back
/// with a single `set`. A failed write leaves the previous value in storage
/// and does not notify observers.
pub struct CartStore<S> {
    storage: S,
    key: String,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S> fmt::Debug for CartStore<S>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage", &self.storage)
            .field("key", &self.key)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Create a store using the default cart key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_KEY)
    }

    /// Create a store persisting under `key`.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            observers: Vec::new(),
        }
    }

    /// Register an observer for cart changes.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read the stored cart, reporting how it was obtained.
    #[must_use]
    pub fn load(&self) -> CartLoad {
        match self.storage.get(&self.key) {
            Ok(None) => CartLoad::Missing,
            Ok(Some(raw)) => match CartState::from_json(&raw) {
                Ok(state) => CartLoad::Loaded(state),
                Err(e) => CartLoad::Corrupt {
                    reason: e.to_string(),
                },
            },
            Err(e) => CartLoad::Unavailable {
                reason: e.to_string(),
            },
        }
    }

    /// The current cart. Unreadable or malformed storage yields an empty cart.
    #[must_use]
    pub fn read(&self) -> CartState {
        let load = self.load();
        match &load {
            CartLoad::Corrupt { reason } => {
                tracing::warn!(key = %self.key, %reason, "Stored cart is malformed, starting empty");
            }
            CartLoad::Unavailable { reason } => {
                tracing::warn!(key = %self.key, %reason, "Cart storage unreadable, starting empty");
            }
            CartLoad::Missing | CartLoad::Loaded(_) => {}
        }
        load.into_state()
    }

    /// Replace the stored cart with `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be serialized or stored.
    #[instrument(skip(self, state), fields(lines = state.len()))]
    pub fn write(&mut self, state: &CartState) -> Result<(), CartError> {
        self.persist(state)?;
        self.notify(state.total_quantity());
        Ok(())
    }

    /// Add `quantity` of `product_id`, merging with an existing line.
    ///
    /// The product is not checked against the catalog; lines for unknown
    /// products are skipped when the cart is displayed or checked out.
    ///
    /// # Errors
    ///
    /// - `CartError::InvalidQuantity` if `quantity` is 0
    /// - `CartError::QuantityOverflow` if the merged quantity does not fit
    /// - `CartError::Storage` if the new cart cannot be stored
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub fn add(&mut self, product_id: &ProductId, quantity: u32) -> Result<CartState, CartError> {
        let quantity = NonZeroU32::new(quantity).ok_or(CartError::InvalidQuantity(quantity))?;

        let mut state = self.read();
        state.add(product_id, quantity)?;
        self.write(&state)?;

        tracing::debug!(total = state.total_quantity(), "Added to cart");
        Ok(state)
    }

    /// Remove the line for `product_id`. Removing an absent product is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the new cart cannot be stored.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub fn remove(&mut self, product_id: &ProductId) -> Result<CartState, CartError> {
        let mut state = self.read();
        let removed = state.remove(product_id.as_str());
        self.write(&state)?;

        tracing::debug!(removed, "Removed from cart");
        Ok(state)
    }

    /// Delete the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the key cannot be deleted.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.storage.remove(&self.key)?;
        self.notify(0);
        Ok(())
    }

    /// Total number of items, counting lines for unknown products too.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.read().total_quantity()
    }

    /// Drop lines whose product is not in `catalog`. Returns how many lines
    /// were dropped; nothing is written when there are none.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the new cart cannot be stored.
    #[instrument(skip(self, catalog))]
    pub fn prune_stale(&mut self, catalog: &Catalog) -> Result<usize, CartError> {
        let mut state = self.read();
        let before = state.len();
        state.retain(|line| catalog.get_by_id(line.product_id.as_str()).is_some());
        let dropped = before - state.len();

        if dropped > 0 {
            self.write(&state)?;
            tracing::info!(dropped, "Pruned stale cart lines");
        }
        Ok(dropped)
    }

    fn persist(&mut self, state: &CartState) -> Result<(), CartError> {
        let json = state.to_json()?;
        self.storage.set(&self.key, &json)?;
        Ok(())
    }

    fn notify(&self, total_quantity: u64) {
        for observer in &self.observers {
            observer.cart_changed(total_quantity);
        }
    }
}
