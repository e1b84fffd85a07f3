//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! fa categories
//! fa products --category "Wrist Watch"
//! fa show w1
//! fa buy w1
//! ```

use std::io::Write;

use fa_portfolio_core::Category;
use fa_portfolio_storefront::{KeyValueStorage, Product};

use super::{CliError, Session};

/// List categories with their product counts.
pub fn categories<S: KeyValueStorage>(
    session: &Session<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    for category in session.catalog.categories() {
        let count = session.catalog.list_by_category(category).len();
        writeln!(out, "{category} ({count})  [{}]", category.slug())?;
    }
    Ok(())
}

/// List products, optionally limited to one category.
pub fn products<S: KeyValueStorage>(
    session: &Session<S>,
    category: Option<Category>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let products: Vec<&Product> = match category {
        Some(category) => session.catalog.list_by_category(category),
        None => session.catalog.iter().collect(),
    };

    if products.is_empty() {
        match category {
            Some(category) => writeln!(out, "No products in \"{category}\" yet.")?,
            None => writeln!(out, "No products yet.")?,
        }
        return Ok(());
    }

    let currency = session.links.currency();
    for product in products {
        writeln!(
            out,
            "{:<6} {:<22} {:>10}  {}",
            product.id,
            product.name,
            product.unit_price(currency).to_string(),
            product.category
        )?;
    }
    Ok(())
}

/// Show one product with its buy-now link.
pub fn show<S: KeyValueStorage>(
    session: &Session<S>,
    product_id: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let product = session.product(product_id)?;
    let links = &session.links;

    writeln!(out, "{}", product.name)?;
    writeln!(out, "Category: {}", product.category)?;
    writeln!(out, "Price: {}", product.unit_price(links.currency()))?;
    if !product.description.is_empty() {
        writeln!(out, "{}", product.description)?;
    }
    writeln!(out, "Image: {}", links.image_url(product))?;
    writeln!(out, "Buy now: {}", links.item_link(product))?;
    Ok(())
}

/// Print only the buy-now link for a product.
pub fn buy<S: KeyValueStorage>(
    session: &Session<S>,
    product_id: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let product = session.product(product_id)?;
    writeln!(out, "{}", session.links.item_link(product))?;
    Ok(())
}
