//! Core types for the Erasto Coffee storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use cart::{CartLineItem, LineKey, total_of};
pub use id::*;
pub use price::{CurrencyCode, Price, format_price};
pub use product::{
    Category, DEFAULT_GRIND, LOW_STOCK_THRESHOLD, LineSelection, Product, RoastLevel,
    SelectionError,
};
pub use status::{OrderStatus, progress_for_label};
