//! Integration tests for the Erasto Coffee storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p erasto-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store over on-disk snapshots, across reopen
//! - `storefront_flow` - Browsing the catalog and adding to the cart through
//!   `AppState`
//!
//! The tests use temporary directories only; nothing outside them is
//! touched.
