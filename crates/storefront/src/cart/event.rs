//! Notifications produced by cart mutations.
//!
//! Consumers show these as toasts; the store itself only logs them.

/// What a cart mutation did, for display to the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line was appended.
    ItemAdded { name: String, quantity: u32 },
    /// An existing line absorbed the added quantity.
    QuantityMerged { name: String, quantity: u32 },
    /// A line was removed.
    ItemRemoved { name: String },
    /// Every line was removed.
    Cleared,
}

impl CartEvent {
    /// Short heading for the notification.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::ItemAdded { .. } => "Item added to cart",
            Self::QuantityMerged { .. } => "Item updated in cart",
            Self::ItemRemoved { .. } => "Item removed from cart",
            Self::Cleared => "Cart cleared",
        }
    }

    /// One-line body for the notification.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::ItemAdded { name, quantity } => format!("{name} ({quantity}) added to your cart"),
            Self::QuantityMerged { name, quantity } => {
                format!("{name} quantity updated to {quantity}")
            }
            Self::ItemRemoved { name } => format!("{name} removed from your cart"),
            Self::Cleared => "All items have been removed from your cart".to_string(),
        }
    }
}

impl std::fmt::Display for CartEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title(), self.description())
    }
}
