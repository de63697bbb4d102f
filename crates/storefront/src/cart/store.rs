//! The cart store.
//!
//! [`CartStore`] is the single source of truth for cart contents. Every
//! mutation updates the in-memory list and then synchronously writes the
//! whole list back to its storage slot.

use erasto_core::{CartLineItem, LineKey, ProductId, total_of};
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use super::event::CartEvent;
use super::storage::{SnapshotStorage, StorageError, keys, validate_key};

/// How the store's initial contents were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// No snapshot existed; the cart started empty.
    Empty,
    /// A snapshot was loaded.
    Restored {
        /// Number of lines after merging.
        lines: usize,
    },
    /// A snapshot existed but could not be read or parsed; the cart started
    /// empty.
    Discarded,
}

/// Cart contents plus the storage slot they are persisted to.
#[derive(Debug)]
pub struct CartStore<S: SnapshotStorage> {
    items: Vec<CartLineItem>,
    storage: S,
    key: String,
    hydration: Hydration,
}

impl<S: SnapshotStorage> CartStore<S> {
    /// Open the cart persisted under the default `cart` key.
    ///
    /// Never fails: a missing or unreadable snapshot yields an empty cart.
    pub fn open(storage: S) -> Self {
        Self::hydrate(storage, keys::CART.to_owned())
    }

    /// Open the cart persisted under a custom key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the key is not a valid slot name.
    pub fn open_with_key(storage: S, key: &str) -> Result<Self, StorageError> {
        validate_key(key)?;
        Ok(Self::hydrate(storage, key.to_owned()))
    }

    fn hydrate(storage: S, key: String) -> Self {
        let (items, hydration) = match storage.get(&key) {
            Ok(None) => (Vec::new(), Hydration::Empty),
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
                Ok(saved) => {
                    let mut items = Vec::with_capacity(saved.len());
                    for line in saved {
                        if line.quantity == 0 {
                            debug!(
                                key = %key,
                                product_id = %line.product_id,
                                "Skipping saved line with zero quantity"
                            );
                            continue;
                        }
                        merge_line(&mut items, line);
                    }
                    let lines = items.len();
                    debug!(key = %key, lines, "Restored saved cart");
                    (items, Hydration::Restored { lines })
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to parse saved cart, starting empty");
                    (Vec::new(), Hydration::Discarded)
                }
            },
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read saved cart, starting empty");
                (Vec::new(), Hydration::Discarded)
            }
        };

        Self {
            items,
            storage,
            key,
            hydration,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a line item, merging it into an existing line with the same
    /// `(product_id, grind, size)` identity.
    ///
    /// A merge only adds to the quantity; the existing line's name and price
    /// are kept.
    #[instrument(skip_all, fields(product_id = %item.product_id, quantity = item.quantity))]
    pub fn add(&mut self, item: CartLineItem) -> CartEvent {
        let event = merge_line(&mut self.items, item);
        debug!(%event, "Cart updated");
        self.persist();
        event
    }

    /// Remove the first line for `product_id`, whatever its variant.
    ///
    /// Returns `None` and leaves the cart untouched if no line matches.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartEvent> {
        let index = self
            .items
            .iter()
            .position(|line| line.product_id == *product_id)?;
        Some(self.remove_at(index))
    }

    /// Remove exactly the line with the given identity.
    #[instrument(skip_all, fields(line = %key))]
    pub fn remove_line(&mut self, key: &LineKey) -> Option<CartEvent> {
        let index = self.items.iter().position(|line| line.matches(key))?;
        Some(self.remove_at(index))
    }

    /// Set the quantity of the first line for `product_id`.
    ///
    /// Quantities below 1 are ignored (use [`CartStore::remove`] to delete a
    /// line), as are values too large for a line quantity. Returns whether a
    /// line was changed.
    #[instrument(skip_all, fields(product_id = %product_id, quantity = quantity))]
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        let Some(quantity) = valid_quantity(quantity) else {
            return false;
        };
        let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == *product_id)
        else {
            debug!("No line for product, ignoring quantity update");
            return false;
        };
        line.quantity = quantity;
        self.persist();
        true
    }

    /// Set the quantity of exactly the line with the given identity.
    ///
    /// Same floor rule as [`CartStore::update_quantity`].
    #[instrument(skip_all, fields(line = %key, quantity = quantity))]
    pub fn update_line_quantity(&mut self, key: &LineKey, quantity: i64) -> bool {
        let Some(quantity) = valid_quantity(quantity) else {
            return false;
        };
        let Some(line) = self.items.iter_mut().find(|line| line.matches(key)) else {
            debug!("No matching line, ignoring quantity update");
            return false;
        };
        line.quantity = quantity;
        self.persist();
        true
    }

    /// Remove every line and persist an empty snapshot.
    #[instrument(skip_all)]
    pub fn clear(&mut self) -> CartEvent {
        self.items.clear();
        self.persist();
        CartEvent::Cleared
    }

    fn remove_at(&mut self, index: usize) -> CartEvent {
        let removed = self.items.remove(index);
        self.persist();
        CartEvent::ItemRemoved { name: removed.name }
    }

    /// Write the full cart to storage.
    ///
    /// Failures are logged and swallowed: the in-memory cart stays
    /// authoritative for the rest of the session.
    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.items) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, &payload) {
            warn!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Look up the line with the given identity.
    #[must_use]
    pub fn find(&self, key: &LineKey) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.matches(key))
    }

    /// Sum of `unit_price × quantity` over all lines, saturating at the
    /// bounds of `Decimal` instead of overflowing.
    #[must_use]
    pub fn get_total(&self) -> Decimal {
        total_of(&self.items)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn get_item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// How the initial contents were obtained.
    #[must_use]
    pub const fn hydration(&self) -> Hydration {
        self.hydration
    }

    /// Storage slot the cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

/// Merge `item` into `items` by identity, or append it.
fn merge_line(items: &mut Vec<CartLineItem>, item: CartLineItem) -> CartEvent {
    let key = item.key();
    if let Some(existing) = items.iter_mut().find(|line| line.matches(&key)) {
        existing.quantity = existing.quantity.saturating_add(item.quantity);
        CartEvent::QuantityMerged {
            name: existing.name.clone(),
            quantity: existing.quantity,
        }
    } else {
        let event = CartEvent::ItemAdded {
            name: item.name.clone(),
            quantity: item.quantity,
        };
        items.push(item);
        event
    }
}

fn valid_quantity(quantity: i64) -> Option<u32> {
    if quantity < 1 {
        debug!(quantity, "Ignoring quantity below 1");
        return None;
    }
    u32::try_from(quantity).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::storage::MemoryStorage;

    fn line(id: &str, price_cents: i64, quantity: u32, size: Option<&str>) -> CartLineItem {
        CartLineItem {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            unit_price: Decimal::new(price_cents, 2),
            image_ref: format!("{id}.jpg"),
            quantity,
            variant_grind: None,
            variant_size: size.map(str::to_owned),
        }
    }

    fn saved(store: &CartStore<MemoryStorage>) -> Vec<CartLineItem> {
        serde_json::from_str(store.storage().raw(keys::CART).unwrap()).unwrap()
    }

    #[test]
    fn test_open_without_snapshot_is_empty() {
        let store = CartStore::open(MemoryStorage::new());
        assert!(store.is_empty());
        assert_eq!(store.hydration(), Hydration::Empty);
        // Opening alone does not write
        assert_eq!(store.storage().raw(keys::CART), None);
    }

    #[test]
    fn test_add_same_identity_merges() {
        let mut store = CartStore::open(MemoryStorage::new());
        let first = store.add(line("coffee-001", 1699, 1, Some("250g")));
        let second = store.add(line("coffee-001", 1699, 2, Some("250g")));

        assert!(matches!(first, CartEvent::ItemAdded { quantity: 1, .. }));
        assert!(matches!(second, CartEvent::QuantityMerged { quantity: 3, .. }));
        assert_eq!(store.line_count(), 1);
        assert_eq!(store.items()[0].quantity, 3);
        assert_eq!(store.get_total(), Decimal::new(5097, 2));
    }

    #[test]
    fn test_merge_keeps_existing_name_and_price() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-001", 1699, 1, None));

        let mut repriced = line("coffee-001", 1899, 1, None);
        repriced.name = "Renamed".to_string();
        store.add(repriced);

        let merged = &store.items()[0];
        assert_eq!(merged.quantity, 2);
        assert_eq!(merged.unit_price, Decimal::new(1699, 2));
        assert_eq!(merged.name, "Product coffee-001");
    }

    #[test]
    fn test_add_different_variants_stay_separate() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-001", 1699, 1, Some("250g")));
        store.add(line("coffee-001", 1699, 1, Some("500g")));

        let mut espresso = line("coffee-001", 1699, 1, Some("250g"));
        espresso.variant_grind = Some("Espresso".to_string());
        store.add(espresso);

        assert_eq!(store.line_count(), 3);
        assert_eq!(store.get_item_count(), 3);
    }

    #[test]
    fn test_add_persists_every_time() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-002", 1899, 1, None));
        assert_eq!(saved(&store), store.items());

        store.add(line("coffee-003", 2199, 4, None));
        assert_eq!(saved(&store).len(), 2);
    }

    #[test]
    fn test_remove_first_match_only() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-001", 1699, 1, Some("250g")));
        store.add(line("coffee-001", 1699, 1, Some("500g")));

        let event = store.remove(&ProductId::new("coffee-001"));
        assert!(matches!(event, Some(CartEvent::ItemRemoved { .. })));
        assert_eq!(store.line_count(), 1);
        assert_eq!(store.items()[0].variant_size.as_deref(), Some("500g"));
        assert_eq!(saved(&store).len(), 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-001", 1699, 1, None));
        assert_eq!(store.remove(&ProductId::new("coffee-999")), None);
        assert_eq!(store.line_count(), 1);
    }

    #[test]
    fn test_remove_line_targets_exact_variant() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-001", 1699, 1, Some("250g")));
        store.add(line("coffee-001", 1699, 1, Some("500g")));

        let key = LineKey::new("coffee-001", None, Some("500g".to_string()));
        assert!(store.remove_line(&key).is_some());
        assert_eq!(store.items()[0].variant_size.as_deref(), Some("250g"));
        assert!(store.remove_line(&key).is_none());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-004", 1799, 1, None));

        assert!(store.update_quantity(&ProductId::new("coffee-004"), 5));
        assert_eq!(store.get_item_count(), 5);
        assert_eq!(saved(&store)[0].quantity, 5);
    }

    #[test]
    fn test_update_quantity_below_one_is_noop() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-004", 1799, 2, None));
        let before = store.items().to_vec();

        assert!(!store.update_quantity(&ProductId::new("coffee-004"), 0));
        assert!(!store.update_quantity(&ProductId::new("coffee-004"), -3));
        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_update_quantity_too_large_is_noop() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-004", 1799, 2, None));
        assert!(!store.update_quantity(&ProductId::new("coffee-004"), i64::from(u32::MAX) + 1));
        assert_eq!(store.get_item_count(), 2);
    }

    #[test]
    fn test_update_quantity_first_match_only() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-001", 1699, 1, Some("250g")));
        store.add(line("coffee-001", 1699, 1, Some("500g")));

        store.update_quantity(&ProductId::new("coffee-001"), 4);
        assert_eq!(store.items()[0].quantity, 4);
        assert_eq!(store.items()[1].quantity, 1);
    }

    #[test]
    fn test_update_line_quantity_targets_exact_variant() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-001", 1699, 1, Some("250g")));
        store.add(line("coffee-001", 1699, 1, Some("500g")));

        let key = LineKey::new("coffee-001", None, Some("500g".to_string()));
        assert!(store.update_line_quantity(&key, 7));
        assert_eq!(store.find(&key).unwrap().quantity, 7);
        assert_eq!(store.items()[0].quantity, 1);
        assert!(!store.update_line_quantity(&key, 0));
    }

    #[test]
    fn test_clear_persists_empty_snapshot() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-005", 1999, 2, None));

        assert_eq!(store.clear(), CartEvent::Cleared);
        assert_eq!(store.get_item_count(), 0);
        assert_eq!(store.get_total(), Decimal::ZERO);
        assert_eq!(store.storage().raw(keys::CART), Some("[]"));
    }

    #[test]
    fn test_totals() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-001", 1699, 2, None));
        store.add(line("coffee-006", 2499, 1, None));
        assert_eq!(store.get_item_count(), 3);
        assert_eq!(store.get_total(), Decimal::new(5897, 2));
    }

    #[test]
    fn test_hydrate_roundtrip_preserves_order() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add(line("coffee-003", 2199, 1, None));
        store.add(line("coffee-001", 1699, 2, Some("1kg")));
        store.add(line("coffee-006", 2499, 1, None));
        let before = store.items().to_vec();

        let reopened = CartStore::open(store.into_storage());
        assert_eq!(reopened.items(), before.as_slice());
        assert_eq!(reopened.hydration(), Hydration::Restored { lines: 3 });
    }

    #[test]
    fn test_hydrate_malformed_snapshot_is_empty() {
        let storage = MemoryStorage::with_value(keys::CART, "{not json");
        let store = CartStore::open(storage);
        assert!(store.is_empty());
        assert_eq!(store.hydration(), Hydration::Discarded);
    }

    #[test]
    fn test_hydrate_foreign_shape_is_empty() {
        let storage = MemoryStorage::with_value(keys::CART, r#"{"items": []}"#);
        assert_eq!(CartStore::open(storage).hydration(), Hydration::Discarded);

        let storage = MemoryStorage::with_value(
            keys::CART,
            r#"[{"id":"coffee-001","name":"x","price":1.0,"image":"x","quantity":-1}]"#,
        );
        assert!(CartStore::open(storage).is_empty());
    }

    #[test]
    fn test_hydrate_merges_duplicate_identities() {
        let raw = r#"[
            {"id":"coffee-001","name":"A","price":16.99,"image":"a","quantity":1,"size":"250g"},
            {"id":"coffee-002","name":"B","price":18.99,"image":"b","quantity":1},
            {"id":"coffee-001","name":"A","price":16.99,"image":"a","quantity":2,"size":"250g"}
        ]"#;
        let store = CartStore::open(MemoryStorage::with_value(keys::CART, raw));
        assert_eq!(store.line_count(), 2);
        assert_eq!(store.items()[0].quantity, 3);
        assert_eq!(store.items()[1].product_id, "coffee-002");
    }

    #[test]
    fn test_open_with_key_uses_custom_slot() {
        let mut store = CartStore::open_with_key(MemoryStorage::new(), "cart-staging").unwrap();
        store.add(line("coffee-001", 1699, 1, None));
        assert_eq!(store.key(), "cart-staging");
        assert!(store.storage().raw("cart-staging").is_some());
        assert!(store.storage().raw(keys::CART).is_none());
    }

    #[test]
    fn test_open_with_invalid_key() {
        assert!(matches!(
            CartStore::open_with_key(MemoryStorage::new(), "../cart"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    /// Storage that holds a fixed snapshot and rejects every write.
    #[derive(Debug, Default)]
    struct ReadOnlyStorage {
        snapshot: Option<String>,
        failed_writes: usize,
    }

    impl SnapshotStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.snapshot.clone())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            self.failed_writes += 1;
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_failed_writes_keep_cart_in_memory() {
        let mut store = CartStore::open(ReadOnlyStorage::default());

        store.add(line("coffee-001", 1699, 1, Some("250g")));
        store.add(line("coffee-001", 1699, 2, Some("250g")));
        store.add(line("coffee-002", 1899, 1, None));
        assert!(store.update_quantity(&ProductId::new("coffee-002"), 4));
        assert!(store.remove(&ProductId::new("coffee-001")).is_some());

        assert_eq!(store.line_count(), 1);
        assert_eq!(store.get_item_count(), 4);
        assert_eq!(store.get_total(), Decimal::new(7596, 2));
        assert_eq!(store.storage().failed_writes, 5);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_overflowing_snapshot_total_saturates() {
        let raw = r#"[{"id":"x","name":"x","price":100000000000000000000,"image":"","quantity":4000000000}]"#;
        let store = CartStore::open(MemoryStorage::with_value(keys::CART, raw));

        assert_eq!(store.hydration(), Hydration::Restored { lines: 1 });
        assert_eq!(store.get_total(), Decimal::MAX);
        assert_eq!(store.get_item_count(), 4_000_000_000);
    }

    #[test]
    fn test_add_extreme_price_total_saturates() {
        let mut store = CartStore::open(MemoryStorage::new());
        let mut item = line("coffee-001", 0, 2, None);
        item.unit_price = Decimal::MAX;
        store.add(item);
        store.add(line("coffee-002", 1899, 1, None));

        assert_eq!(store.get_total(), Decimal::MAX);
    }

    #[test]
    fn test_high_precision_price_survives_reopen() {
        let price: Decimal = "1.234567890123456789".parse().unwrap();
        let mut store = CartStore::open(MemoryStorage::new());
        let mut item = line("coffee-001", 0, 3, None);
        item.unit_price = price;
        store.add(item);

        let reopened = CartStore::open(store.into_storage());
        assert_eq!(reopened.items()[0].unit_price, price);
        assert_eq!(reopened.get_total(), price * Decimal::from(3));
    }

    #[test]
    fn test_hydrate_skips_zero_quantity_lines() {
        let raw = r#"[
            {"id":"coffee-001","name":"A","price":16.99,"image":"a","quantity":0},
            {"id":"coffee-002","name":"B","price":18.99,"image":"b","quantity":2}
        ]"#;
        let store = CartStore::open(MemoryStorage::with_value(keys::CART, raw));

        assert_eq!(store.hydration(), Hydration::Restored { lines: 1 });
        assert_eq!(store.items()[0].product_id, "coffee-002");
        assert!(store.items().iter().all(|line| line.quantity >= 1));
    }
}
