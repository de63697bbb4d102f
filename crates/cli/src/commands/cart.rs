//! Cart commands.
//!
//! Mutations print the cart notification, then the cart summary.

use std::io::Write;

use erasto_core::{LineKey, LineSelection, ProductId, format_price};
use erasto_storefront::cart::{CartEvent, SnapshotStorage};
use erasto_storefront::{AppState, Result};

/// Print every line with its subtotal, then the cart totals.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn show<S: SnapshotStorage>(state: &AppState<S>, out: &mut impl Write) -> Result<()> {
    let cart = state.cart();
    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    for line in cart.items() {
        let variant = match (&line.variant_size, &line.variant_grind) {
            (Some(size), Some(grind)) => format!(" ({size}, {grind})"),
            (Some(one), None) | (None, Some(one)) => format!(" ({one})"),
            (None, None) => String::new(),
        };
        writeln!(
            out,
            "{:<12} {}{variant}  {} x {} = {}",
            line.product_id,
            line.name,
            line.quantity,
            format_price(line.unit_price),
            format_price(line.line_total())
        )?;
    }
    summary(state, out)
}

/// Add a product by slug with the product page's defaults filled in.
///
/// # Errors
///
/// Returns an error if the slug is unknown, the selection is invalid, or
/// output cannot be written.
pub fn add<S: SnapshotStorage>(
    state: &mut AppState<S>,
    slug: &str,
    selection: &LineSelection,
    out: &mut impl Write,
) -> Result<()> {
    let event = state.add_to_cart(slug, selection)?;
    notify(&event, out)?;
    summary(state, out)
}

/// Remove a line. With a variant key, only the exact line is removed;
/// otherwise the first line for the product.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn remove<S: SnapshotStorage>(
    state: &mut AppState<S>,
    product_id: &ProductId,
    key: Option<&LineKey>,
    out: &mut impl Write,
) -> Result<()> {
    let event = match key {
        Some(key) => state.cart_mut().remove_line(key),
        None => state.cart_mut().remove(product_id),
    };

    match event {
        Some(event) => notify(&event, out)?,
        None => writeln!(out, "No matching line in your cart")?,
    }
    summary(state, out)
}

/// Set a line's quantity. Quantities below 1 leave the cart unchanged.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn update<S: SnapshotStorage>(
    state: &mut AppState<S>,
    product_id: &ProductId,
    key: Option<&LineKey>,
    quantity: i64,
    out: &mut impl Write,
) -> Result<()> {
    let changed = match key {
        Some(key) => state.cart_mut().update_line_quantity(key, quantity),
        None => state.cart_mut().update_quantity(product_id, quantity),
    };

    if changed {
        writeln!(out, "Quantity set to {quantity}")?;
    } else {
        writeln!(out, "Cart unchanged")?;
    }
    summary(state, out)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn clear<S: SnapshotStorage>(state: &mut AppState<S>, out: &mut impl Write) -> Result<()> {
    let event = state.cart_mut().clear();
    notify(&event, out)?;
    Ok(())
}

fn notify(event: &CartEvent, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", event.title())?;
    writeln!(out, "  {}", event.description())?;
    Ok(())
}

fn summary<S: SnapshotStorage>(state: &AppState<S>, out: &mut impl Write) -> Result<()> {
    let cart = state.cart();
    let count = cart.get_item_count();
    let noun = if count == 1 { "item" } else { "items" };
    writeln!(
        out,
        "{count} {noun}, total {}",
        format_price(cart.get_total())
    )?;
    Ok(())
}
