//! Order tracking commands.

use std::io::Write;

use erasto_core::OrderStatus;
use erasto_storefront::orders::{delivery_estimate, generate_order_id};
use erasto_storefront::Result;

const BAR_WIDTH: usize = 20;

/// Print the tracking timeline for a status label.
///
/// Unknown labels show 0% progress with no stage completed.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn status(label: &str, out: &mut impl Write) -> Result<()> {
    let current = OrderStatus::parse_label(label);
    if current.is_none() {
        tracing::warn!(label, "Unknown order status label");
    }
    let progress = current.map_or(0, |status| status.progress());

    let filled = usize::from(progress) * BAR_WIDTH / 100;
    writeln!(
        out,
        "[{}{}] {progress}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )?;

    for stage in OrderStatus::ALL {
        let mark = match current {
            Some(current) if stage.index() < current.index() => "x",
            Some(current) if stage == current => ">",
            _ => " ",
        };
        writeln!(out, "  [{mark}] {}", stage.label())?;
    }
    Ok(())
}

/// Print a fresh order reference and the standard delivery window.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn reference(out: &mut impl Write) -> Result<()> {
    let order_id = generate_order_id();
    tracing::info!(%order_id, "Generated order reference");

    writeln!(out, "Order number: {order_id}")?;
    writeln!(out, "Estimated delivery: {}", delivery_estimate())?;
    Ok(())
}
