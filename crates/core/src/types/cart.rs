//! Cart line items and their identity.
//!
//! A cart line is identified by the tuple `(product_id, grind, size)`. Two
//! additions with the same tuple are merged into one line; additions that
//! differ in any element stay separate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// One purchasable selection in the cart.
///
/// Field names on the wire (`id`, `price`, `image`, `grind`, `size`) match
/// the shape carts are persisted in, so existing snapshots keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Product name at the time the item was added.
    pub name: String,
    /// Unit price at the time the item was added. Written as an exact JSON
    /// number so reloading a cart never changes its prices.
    #[serde(rename = "price", with = "rust_decimal::serde::arbitrary_precision")]
    pub unit_price: Decimal,
    #[serde(rename = "image")]
    pub image_ref: String,
    pub quantity: u32,
    #[serde(rename = "grind", default, skip_serializing_if = "Option::is_none")]
    pub variant_grind: Option<String>,
    #[serde(rename = "size", default, skip_serializing_if = "Option::is_none")]
    pub variant_size: Option<String>,
}

impl CartLineItem {
    /// Identity tuple of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            grind: self.variant_grind.clone(),
            size: self.variant_size.clone(),
        }
    }

    /// Whether this line has the given identity.
    ///
    /// Equivalent to `self.key() == *key` without cloning.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id
            && self.variant_grind == key.grind
            && self.variant_size == key.size
    }

    /// `unit_price × quantity`, saturating at the bounds of `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or_else(|| saturated(self.unit_price))
    }
}

/// Sum of line totals, saturating at the bounds of `Decimal`.
#[must_use]
pub fn total_of<'a>(lines: impl IntoIterator<Item = &'a CartLineItem>) -> Decimal {
    lines.into_iter().fold(Decimal::ZERO, |total, line| {
        let amount = line.line_total();
        total
            .checked_add(amount)
            .unwrap_or_else(|| saturated(amount))
    })
}

/// The bound an overflowing operation with `toward` ran into.
fn saturated(toward: Decimal) -> Decimal {
    if toward.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// The `(product_id, grind, size)` identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub grind: Option<String>,
    pub size: Option<String>,
}

impl LineKey {
    /// Create a key.
    #[must_use]
    pub fn new(
        product_id: impl Into<ProductId>,
        grind: Option<String>,
        size: Option<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            grind,
            size,
        }
    }
}

impl std::fmt::Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.product_id)?;
        if let Some(size) = &self.size {
            write!(f, " / {size}")?;
        }
        if let Some(grind) = &self.grind {
            write!(f, " / {grind}")?;
        }
        Ok(())
    }
}
