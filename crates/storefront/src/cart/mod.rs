//! Shopping cart.
//!
//! The cart is a flat list of [`erasto_core::CartLineItem`]s owned by a
//! [`CartStore`]. The store hydrates from a [`SnapshotStorage`] slot when it
//! is opened and writes the full list back after every mutation.
//!
//! # Example
//!
//! ```rust
//! use erasto_core::{CartLineItem, ProductId};
//! use erasto_storefront::cart::{CartStore, MemoryStorage};
//! use rust_decimal::Decimal;
//!
//! let mut cart = CartStore::open(MemoryStorage::new());
//! let item = CartLineItem {
//!     product_id: ProductId::new("coffee-001"),
//!     name: "Kilimanjaro Morning Blend".to_string(),
//!     unit_price: Decimal::new(1699, 2),
//!     image_ref: "morning.jpg".to_string(),
//!     quantity: 1,
//!     variant_grind: None,
//!     variant_size: Some("250g".to_string()),
//! };
//!
//! cart.add(item.clone());
//! cart.add(CartLineItem { quantity: 2, ..item });
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.get_item_count(), 3);
//! assert_eq!(cart.get_total(), Decimal::new(5097, 2));
//! ```

pub mod event;
pub mod storage;
pub mod store;

pub use event::CartEvent;
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage, StorageError};
pub use store::{CartStore, Hydration};
