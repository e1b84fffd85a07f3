//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! fa cart add w1 --qty 2
//! fa cart show
//! fa cart remove w1
//! fa cart link
//! fa cart clear
//! ```

use std::io::Write;

use fa_portfolio_storefront::{CartSummary, KeyValueStorage};

use super::{CliError, Session, parse_product_id};

/// Render the cart with subtotals, total and checkout link.
pub fn show<S: KeyValueStorage>(
    session: &Session<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let cart = session.cart.read();
    let summary = CartSummary::build(&cart, &session.catalog, session.links.currency());

    if summary.is_empty() {
        writeln!(out, "Your cart is empty.")?;
    }
    for line in &summary.lines {
        writeln!(
            out,
            "{} [{}]: {} × {} = {}",
            line.product.name, line.product.id, line.quantity, line.unit_price, line.subtotal
        )?;
    }
    if summary.stale_lines > 0 {
        writeln!(
            out,
            "({} unavailable item(s) hidden; run `fa cart prune` to remove them)",
            summary.stale_lines
        )?;
    }
    writeln!(out, "Total: {}", summary.total)?;
    writeln!(out, "Checkout: {}", session.links.cart_link(&cart, &session.catalog))?;
    Ok(())
}

/// Add a catalog product to the cart.
pub fn add<S: KeyValueStorage>(
    session: &mut Session<S>,
    product_id: &str,
    quantity: u32,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let id = session.product(product_id)?.id.clone();
    session.cart.add(&id, quantity)?;
    writeln!(out, "Added to cart")?;
    Ok(())
}

/// Remove a product's line from the cart.
pub fn remove<S: KeyValueStorage>(
    session: &mut Session<S>,
    product_id: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let id = parse_product_id(product_id)?;
    session.cart.remove(&id)?;
    writeln!(out, "Removed")?;
    Ok(())
}

/// Empty the cart.
pub fn clear<S: KeyValueStorage>(
    session: &mut Session<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    session.cart.clear()?;
    writeln!(out, "Cart cleared")?;
    Ok(())
}

/// Print the number of items in the cart.
pub fn count<S: KeyValueStorage>(
    session: &Session<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    writeln!(out, "{}", session.cart.total_quantity())?;
    Ok(())
}

/// Print the checkout link for the cart.
pub fn link<S: KeyValueStorage>(
    session: &Session<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let cart = session.cart.read();
    writeln!(out, "{}", session.links.cart_link(&cart, &session.catalog))?;
    Ok(())
}

/// Drop lines for products no longer in the catalog.
pub fn prune<S: KeyValueStorage>(
    session: &mut Session<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let dropped = session.cart.prune_stale(&session.catalog)?;
    writeln!(out, "Removed {dropped} unavailable item(s)")?;
    Ok(())
}
