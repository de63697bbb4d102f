//! Integration tests for the cart store over on-disk snapshots.
//!
//! Each test opens a store, mutates it, drops it and reopens a new store on
//! the same directory, the way a shopper's next visit would.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::fs;

use erasto_core::{CartLineItem, LineKey, ProductId};
use erasto_storefront::cart::{CartStore, FileStorage, Hydration};
use rust_decimal::Decimal;
use tempfile::TempDir;

fn line(id: &str, price_cents: i64, quantity: u32, size: Option<&str>) -> CartLineItem {
    CartLineItem {
        product_id: ProductId::new(id),
        name: format!("Product {id}"),
        unit_price: Decimal::new(price_cents, 2),
        image_ref: format!("{id}.jpg"),
        quantity,
        variant_grind: None,
        variant_size: size.map(str::to_string),
    }
}

fn open(dir: &TempDir) -> CartStore<FileStorage> {
    CartStore::open(FileStorage::new(dir.path()))
}

// =============================================================================
// Round Trip
// =============================================================================

#[test]
fn test_fresh_directory_starts_empty() {
    let dir = TempDir::new().unwrap();
    let cart = open(&dir);

    assert!(cart.is_empty());
    assert_eq!(cart.hydration(), Hydration::Empty);
    assert_eq!(cart.get_total(), Decimal::ZERO);
    assert!(!dir.path().join("cart.json").exists());
}

#[test]
fn test_cart_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut cart = open(&dir);
        cart.add(line("coffee-001", 1699, 1, Some("250g")));
        cart.add(line("coffee-001", 1699, 2, Some("250g")));
        cart.add(line("coffee-006", 2499, 1, None));
    }

    let cart = open(&dir);
    assert_eq!(cart.hydration(), Hydration::Restored { lines: 2 });
    assert_eq!(cart.items()[0].product_id, "coffee-001");
    assert_eq!(cart.items()[0].quantity, 3);
    assert_eq!(cart.items()[1].product_id, "coffee-006");
    assert_eq!(cart.get_item_count(), 4);
    assert_eq!(cart.get_total(), Decimal::new(7596, 2));
}

#[test]
fn test_snapshot_uses_storefront_json_shape() {
    let dir = TempDir::new().unwrap();
    let mut cart = open(&dir);
    cart.add(line("coffee-003", 2199, 2, Some("500g")));

    let raw = fs::read_to_string(dir.path().join("cart.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let entry = &json.as_array().unwrap()[0];
    assert_eq!(entry["id"], "coffee-003");
    assert_eq!(entry["price"], serde_json::json!(21.99));
    assert_eq!(entry["quantity"], 2);
    assert_eq!(entry["size"], "500g");
    assert!(entry.get("grind").is_none());
}

#[test]
fn test_removal_and_updates_persist() {
    let dir = TempDir::new().unwrap();

    {
        let mut cart = open(&dir);
        cart.add(line("coffee-002", 1899, 1, Some("250g")));
        cart.add(line("coffee-002", 1899, 1, Some("1kg")));
        cart.add(line("coffee-004", 1799, 1, None));

        let kilo = LineKey::new("coffee-002", None, Some("1kg".to_string()));
        assert!(cart.update_line_quantity(&kilo, 5));
        assert!(cart.remove(&ProductId::new("coffee-004")).is_some());
    }

    let cart = open(&dir);
    assert_eq!(cart.line_count(), 2);
    let kilo = LineKey::new("coffee-002", None, Some("1kg".to_string()));
    assert_eq!(cart.find(&kilo).unwrap().quantity, 5);
    assert_eq!(cart.get_item_count(), 6);
}

#[test]
fn test_cleared_cart_stays_empty() {
    let dir = TempDir::new().unwrap();

    {
        let mut cart = open(&dir);
        cart.add(line("coffee-005", 1999, 3, None));
        cart.clear();
    }

    let cart = open(&dir);
    assert!(cart.is_empty());
    assert_eq!(cart.get_item_count(), 0);
}

// =============================================================================
// Damaged Snapshots
// =============================================================================

#[test]
fn test_malformed_snapshot_is_discarded() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cart.json"), "{ not json").unwrap();

    let mut cart = open(&dir);
    assert_eq!(cart.hydration(), Hydration::Discarded);
    assert!(cart.is_empty());

    // The next mutation overwrites the damaged snapshot.
    cart.add(line("coffee-001", 1699, 1, None));
    drop(cart);

    let cart = open(&dir);
    assert_eq!(cart.hydration(), Hydration::Restored { lines: 1 });
}

#[test]
fn test_hand_written_snapshot_is_loaded() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cart.json"),
        r#"[
            {"id":"coffee-001","name":"Kilimanjaro Morning Blend","price":16.99,"image":"a.jpg","quantity":1,"grind":"Espresso","size":"250g"},
            {"id":"coffee-001","name":"Kilimanjaro Morning Blend","price":16.99,"image":"a.jpg","quantity":2,"grind":"Espresso","size":"250g"}
        ]"#,
    )
    .unwrap();

    let cart = open(&dir);
    assert_eq!(cart.line_count(), 1);
    assert_eq!(cart.get_item_count(), 3);
    assert_eq!(cart.get_total(), Decimal::new(5097, 2));
}

#[test]
fn test_custom_key_uses_its_own_slot() {
    let dir = TempDir::new().unwrap();

    {
        let mut cart = CartStore::open_with_key(FileStorage::new(dir.path()), "cart-staging").unwrap();
        cart.add(line("coffee-001", 1699, 1, None));
    }

    assert!(dir.path().join("cart-staging.json").exists());
    assert!(open(&dir).is_empty());
}
