//! Order confirmation helpers.
//!
//! There is no checkout backend; these produce the reference number and
//! delivery window shown on the confirmation screen.

use chrono::Utc;
use erasto_core::OrderId;
use rand::Rng;

/// Prefix of every order reference.
pub const ORDER_ID_PREFIX: &str = "EC";

/// Delivery window in days from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryEstimate {
    pub min_days: u32,
    pub max_days: u32,
}

impl std::fmt::Display for DeliveryEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} business days", self.min_days, self.max_days)
    }
}

/// Standard shipping window.
#[must_use]
pub const fn delivery_estimate() -> DeliveryEstimate {
    DeliveryEstimate {
        min_days: 3,
        max_days: 7,
    }
}

/// Generate an order reference: `EC`, the last six digits of the current
/// millisecond timestamp, then three random digits.
#[must_use]
pub fn generate_order_id() -> OrderId {
    let millis = Utc::now().timestamp_millis().rem_euclid(1_000_000);
    let suffix = rand::rng().random_range(0..1000);
    order_id_from_parts(millis, suffix)
}

fn order_id_from_parts(millis: i64, suffix: u32) -> OrderId {
    OrderId::new(format!("{ORDER_ID_PREFIX}{millis:06}{suffix:03}"))
}
