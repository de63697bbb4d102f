//! Status enums for order tracking.

use serde::{Deserialize, Serialize};

/// Order progress stage shown on the order tracking page.
///
/// Variants are declared in fulfilment order; [`OrderStatus::progress`] relies
/// on that ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    OrderPlaced,
    Processing,
    Roasting,
    Packaging,
    Shipped,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// Every stage, first to last.
    pub const ALL: [Self; 7] = [
        Self::OrderPlaced,
        Self::Processing,
        Self::Roasting,
        Self::Packaging,
        Self::Shipped,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// Human-readable label, e.g. `"Out for Delivery"`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OrderPlaced => "Order Placed",
            Self::Processing => "Processing",
            Self::Roasting => "Roasting",
            Self::Packaging => "Packaging",
            Self::Shipped => "Shipped",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
        }
    }

    /// Parse a stage from its display label. Matching is exact.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }

    /// Position of this stage in [`OrderStatus::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Percentage of the tracking bar filled at this stage, rounded to the
    /// nearest whole percent.
    #[must_use]
    pub const fn progress(&self) -> u8 {
        let last = Self::ALL.len() - 1;
        // index <= 6, so the result always fits in a u8
        #[allow(clippy::cast_possible_truncation)]
        let pct = ((self.index() * 100 + last / 2) / last) as u8;
        pct
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// Progress percentage for a status label; unknown labels report 0.
#[must_use]
pub fn progress_for_label(label: &str) -> u8 {
    OrderStatus::parse_label(label).map_or(0, |status| status.progress())
}
