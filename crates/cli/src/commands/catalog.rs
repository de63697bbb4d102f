//! Catalog browsing commands.

use std::io::Write;

use erasto_core::{Product, format_price};
use erasto_storefront::cart::SnapshotStorage;
use erasto_storefront::catalog::ProductQuery;
use erasto_storefront::{AppState, Result};
use tracing::info;

/// List products matching a query.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn list<S: SnapshotStorage>(
    state: &AppState<S>,
    query: &ProductQuery,
    out: &mut impl Write,
) -> Result<()> {
    let products = state.catalog().browse(query);
    info!(
        matched = products.len(),
        sort = %query.sort,
        "Catalog listing"
    );

    let noun = if products.len() == 1 { "product" } else { "products" };
    writeln!(out, "Showing {} {noun}", products.len())?;

    if products.is_empty() {
        writeln!(out, "No products match your filters.")?;
        return Ok(());
    }

    for product in products {
        writeln!(
            out,
            "{:<12} {:<30} {:>8}  {}{}",
            product.id,
            product.name,
            format_price(product.price),
            product.category,
            badges(product)
        )?;
    }
    Ok(())
}

/// Show one product's page: details, options and related products.
///
/// # Errors
///
/// Returns an error if the slug is unknown or output cannot be written.
pub fn show<S: SnapshotStorage>(state: &AppState<S>, slug: &str, out: &mut impl Write) -> Result<()> {
    let product = state.catalog().require_slug(slug)?;

    writeln!(out, "{} ({})", product.name, product.id)?;
    writeln!(out, "{}", format_price(product.price))?;
    writeln!(out)?;
    writeln!(out, "{}", product.description)?;
    writeln!(out)?;

    writeln!(out, "Category: {}", product.category)?;
    if let Some(roast) = product.roast_level {
        writeln!(out, "Roast:    {roast}")?;
    }
    if let Some(origin) = &product.origin {
        writeln!(out, "Origin:   {origin}")?;
    }
    if !product.flavor_notes.is_empty() {
        writeln!(out, "Notes:    {}", product.flavor_notes.join(", "))?;
    }
    if !product.sizes.is_empty() {
        writeln!(out, "Sizes:    {}", product.sizes.join(", "))?;
    }
    if !product.grind_options.is_empty() {
        writeln!(out, "Grinds:   {}", product.grind_options.join(", "))?;
    }
    writeln!(out, "Stock:    {}", stock_label(product))?;

    let related = state.related(product);
    if !related.is_empty() {
        writeln!(out)?;
        writeln!(out, "You may also like:")?;
        for other in related {
            writeln!(
                out,
                "  {:<30} {:>8}  {}",
                other.name,
                format_price(other.price),
                other.slug
            )?;
        }
    }
    Ok(())
}

fn badges(product: &Product) -> String {
    let mut badges = String::new();
    if product.featured {
        badges.push_str(" [featured]");
    }
    if product.bestseller {
        badges.push_str(" [bestseller]");
    }
    if product.new_arrival {
        badges.push_str(" [new]");
    }
    badges
}

fn stock_label(product: &Product) -> String {
    if !product.is_in_stock() {
        "Out of stock".to_string()
    } else if product.is_low_stock() {
        format!("Only {} left", product.stock)
    } else {
        "In stock".to_string()
    }
}
