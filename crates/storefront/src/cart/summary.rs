//! Cart contents resolved against the catalog.

use fa_portfolio_core::{CurrencyCode, Price};

use super::CartState;
use crate::catalog::{Catalog, Product};

/// A cart line whose product exists in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
    pub unit_price: Price,
    pub subtotal: Price,
}

/// Display data for a cart: priced lines, grand total and item count.
///
/// Lines referring to products missing from the catalog are left out of
/// `lines` and `total` and only counted in `stale_lines`. `item_count` is the
/// raw quantity sum and includes them, matching the cart badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary<'a> {
    pub lines: Vec<SummaryLine<'a>>,
    pub total: Price,
    pub item_count: u64,
    pub stale_lines: usize,
}

impl<'a> CartSummary<'a> {
    /// An empty cart.
    #[must_use]
    pub const fn empty(currency: CurrencyCode) -> Self {
        Self {
            lines: Vec::new(),
            total: Price::zero(currency),
            item_count: 0,
            stale_lines: 0,
        }
    }

    /// Resolve `cart` against `catalog`, keeping cart order.
    #[must_use]
    pub fn build(cart: &CartState, catalog: &'a Catalog, currency: CurrencyCode) -> Self {
        let mut summary = Self::empty(currency);
        summary.item_count = cart.total_quantity();

        for line in cart.lines() {
            let Some(product) = catalog.get_by_id(line.product_id.as_str()) else {
                tracing::debug!(product_id = %line.product_id, "Skipping stale cart line");
                summary.stale_lines += 1;
                continue;
            };

            let quantity = line.quantity.get();
            let unit_price = product.unit_price(currency);
            let subtotal = unit_price.times(quantity);
            summary.total = summary.total.saturating_add(subtotal.amount);
            summary.lines.push(SummaryLine {
                product,
                quantity,
                unit_price,
                subtotal,
            });
        }

        summary
    }

    /// Whether no line resolved to a product.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
